mod params;
mod stage;
mod views;

pub use params::{ParamValue, Parameters};
pub use stage::ProcessingStage;
pub use views::{RecordViews, resolved_record_id};

use crate::types::{Record, RecordId};

///
/// Message names the resolution table keys on. Anything else falls through
/// to the default row.
///

pub mod message {
    pub const ASSIGN: &str = "Assign";
    pub const CREATE: &str = "Create";
    pub const DELETE: &str = "Delete";
    pub const DELIVER_INCOMING: &str = "DeliverIncoming";
    pub const GRANT_ACCESS: &str = "GrantAccess";
    pub const HANDLE: &str = "Handle";
    pub const RESCHEDULE: &str = "Reschedule";
    pub const SET_STATE: &str = "SetState";
    pub const SET_STATE_DYNAMIC: &str = "SetStateDynamicEntity";
    pub const UPDATE: &str = "Update";
}

///
/// Well-known parameter names.
///

pub mod param {
    /// Input: the record (or weak reference) under change.
    pub const TARGET: &str = "Target";
    /// Input: reference carried by state-transition messages.
    pub const ENTITY_MONIKER: &str = "EntityMoniker";
    /// Output: id minted by a create.
    pub const ID: &str = "id";
    /// Output: id minted by an incoming email delivery.
    pub const EMAIL_ID: &str = "emailid";
}

///
/// ExecutionContext
///
/// The host boundary object for one operation. Implemented by platform
/// adapters; the library only ever consumes it behind a reference or box.
///

pub trait ExecutionContext {
    fn message_name(&self) -> &str;

    fn stage(&self) -> ProcessingStage;

    /// Type name of the record the operation runs against.
    fn primary_entity_name(&self) -> &str;

    /// Id the host resolved for the primary record, unset where the host
    /// has none (e.g. before a create).
    fn primary_entity_id(&self) -> RecordId;

    fn input_parameters(&self) -> &Parameters;

    fn output_parameters(&self) -> &Parameters;

    /// Snapshot taken before the main operation, where registered.
    fn pre_image(&self) -> Option<&Record>;

    /// Snapshot taken after the main operation, where registered.
    fn post_image(&self) -> Option<&Record>;

    /// Initiating user. Hosts without the notion may leave this unset.
    fn user_id(&self) -> RecordId {
        RecordId::UNSET
    }

    /// Correlation id linking nested operations, unset when absent.
    fn correlation_id(&self) -> RecordId {
        RecordId::UNSET
    }
}
