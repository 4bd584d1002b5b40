use crate::{
    context::{ExecutionContext, ParamValue, message, param},
    types::{Record, RecordId},
};
use std::cell::OnceCell;

///
/// RecordViews
///
/// The four views of the record one operation runs against: the target the
/// caller handed in, the host's before/after snapshots, and the merged
/// complete view. Target and complete are computed at most once per
/// operation; views never touch the remote service.
///

pub struct RecordViews {
    ctx: Box<dyn ExecutionContext>,
    target: OnceCell<Option<Record>>,
    complete: OnceCell<Option<Record>>,
}

impl RecordViews {
    #[must_use]
    pub fn new(ctx: Box<dyn ExecutionContext>) -> Self {
        Self {
            ctx,
            target: OnceCell::new(),
            complete: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &dyn ExecutionContext {
        self.ctx.as_ref()
    }

    /// The record under change. A weak-reference target surfaces as a bare
    /// record carrying type and id only.
    #[must_use]
    pub fn target(&self) -> Option<&Record> {
        self.target
            .get_or_init(|| target_record(self.ctx.as_ref()))
            .as_ref()
    }

    #[must_use]
    pub fn pre(&self) -> Option<&Record> {
        self.ctx.pre_image()
    }

    #[must_use]
    pub fn post(&self) -> Option<&Record> {
        self.ctx.post_image()
    }

    /// complete
    /// Best knowledge of the record: target, post and pre merged in that
    /// order, first writer wins per attribute. A merged view without an id
    /// gets one from [`resolved_record_id`]; when no view exists at all but
    /// an id resolves, the result is a bare record of the primary type.
    #[must_use]
    pub fn complete(&self) -> Option<&Record> {
        self.complete.get_or_init(|| self.build_complete()).as_ref()
    }

    #[must_use]
    pub fn resolved_id(&self) -> RecordId {
        resolved_record_id(self.ctx.as_ref())
    }

    fn build_complete(&self) -> Option<Record> {
        let views = [
            self.target().cloned(),
            self.ctx.post_image().cloned(),
            self.ctx.pre_image().cloned(),
        ];

        let mut merged: Option<Record> = None;
        for view in views.into_iter().flatten() {
            merged = Some(match merged {
                Some(acc) => acc.merge(&view),
                None => view,
            });
        }

        if merged.as_ref().is_none_or(|r| r.id.is_unset()) {
            let id = resolved_record_id(self.ctx.as_ref());
            if !id.is_unset() {
                match merged.as_mut() {
                    Some(record) => record.id = id,
                    None => merged = Some(Record::with_id(self.ctx.primary_entity_name(), id)),
                }
            }
        }

        merged
    }
}

fn target_record(ctx: &dyn ExecutionContext) -> Option<Record> {
    match ctx.input_parameters().get(param::TARGET) {
        Some(ParamValue::Record(record)) => Some(record.clone()),
        Some(ParamValue::Reference(reference)) => {
            Some(Record::with_id(reference.entity.clone(), reference.id))
        }
        _ => None,
    }
}

/// resolved_record_id
/// Which id this operation is about, by message and stage:
///
/// * `Create` / `DeliverIncoming` — unset before the main operation, then
///   the `id` / `emailid` output parameter.
/// * `Update` / `Reschedule` — the id of the full target record.
/// * `Delete` / `Assign` / `GrantAccess` / `Handle` — the id of the target
///   reference.
/// * `SetState` / `SetStateDynamicEntity` — the id of the state-transition
///   moniker reference.
/// * anything else — the target reference's id when that is what the
///   target is.
///
/// Missing or differently shaped parameters resolve to unset; the function
/// never fails.
#[must_use]
pub fn resolved_record_id(ctx: &dyn ExecutionContext) -> RecordId {
    let input = ctx.input_parameters();
    let output = ctx.output_parameters();

    match ctx.message_name() {
        message::CREATE if ctx.stage().is_before_main() => RecordId::UNSET,
        message::CREATE => output.id(param::ID).unwrap_or(RecordId::UNSET),

        message::DELIVER_INCOMING if ctx.stage().is_before_main() => RecordId::UNSET,
        message::DELIVER_INCOMING => output.id(param::EMAIL_ID).unwrap_or(RecordId::UNSET),

        message::UPDATE | message::RESCHEDULE => {
            input.record(param::TARGET).map_or(RecordId::UNSET, |r| r.id)
        }

        message::DELETE | message::ASSIGN | message::GRANT_ACCESS | message::HANDLE => input
            .reference(param::TARGET)
            .map_or(RecordId::UNSET, |r| r.id),

        message::SET_STATE | message::SET_STATE_DYNAMIC => input
            .reference(param::ENTITY_MONIKER)
            .map_or(RecordId::UNSET, |r| r.id),

        _ => input
            .reference(param::TARGET)
            .map_or(RecordId::UNSET, |r| r.id),
    }
}

///
/// TESTS
///
