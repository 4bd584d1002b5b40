//! Container behavior against a scripted service, the way a host's
//! handler tests would drive it.

use mezza::{
    ContainerConfig, ExecutionContainer,
    core::{
        context::{ProcessingStage, message},
        error::{Error, ServiceError},
        metadata::EntitySchema,
        query::{Condition, FieldSet, Filter, Query},
        trace::MemorySink,
        types::{Record, RecordId, RecordRef, RecordSet, Value},
    },
    testkit::{Call, ContextBuilder, ScriptedService},
};
use std::sync::Arc;

fn rid(fragment: &str) -> RecordId {
    RecordId::coerce(fragment)
}

fn build(
    ctx: ContextBuilder,
    service: &Arc<ScriptedService>,
) -> (ExecutionContainer, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let container = ExecutionContainer::new(ctx.boxed(), service.clone(), sink.clone());
    (container, sink)
}

#[test]
fn complete_view_merges_target_and_images() {
    let service = Arc::new(ScriptedService::new());
    let ctx = ContextBuilder::new(message::UPDATE, "contact")
        .target_record(Record::with_id("contact", rid("9")).attribute("firstname", "Ann"))
        .post_image(Record::with_id("contact", rid("9")).attribute("lastname", "Lee"))
        .pre_image(
            Record::with_id("contact", rid("9"))
                .attribute("firstname", "Anna")
                .attribute("city", "Oslo"),
        );
    let (container, _) = build(ctx, &service);

    let complete = container.complete().expect("complete view");

    assert_eq!(complete.get("firstname"), Some(&Value::Text("Ann".into())));
    assert_eq!(complete.get("lastname"), Some(&Value::Text("Lee".into())));
    assert_eq!(complete.get("city"), Some(&Value::Text("Oslo".into())));
    assert_eq!(complete.id, rid("9"));
}

#[test]
fn create_stage_views_resolve_the_output_id() {
    let service = Arc::new(ScriptedService::new());
    let ctx = ContextBuilder::new(message::CREATE, "account")
        .stage(ProcessingStage::AfterInner)
        .output("id", rid("7"));
    let (container, _) = build(ctx, &service);

    assert_eq!(container.resolved_record_id(), rid("7"));
    let complete = container.complete().expect("id-only view");
    assert_eq!(complete.entity, "account");
    assert_eq!(complete.id, rid("7"));
}

#[test]
fn save_creates_when_the_id_is_unset_and_writes_it_back() {
    let service = Arc::new(ScriptedService::new());
    service.script_create(Ok(rid("42")));
    let (container, _) = build(ContextBuilder::new(message::CREATE, "account"), &service);

    let mut record = Record::new("account").attribute("name", "New Corp");
    container.save(&mut record).expect("save");

    assert_eq!(record.id, rid("42"));
    assert!(matches!(service.calls()[0], Call::Create(_)));
}

#[test]
fn save_updates_when_the_id_is_set() {
    let service = Arc::new(ScriptedService::new());
    service.script_update(Ok(()));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "account"), &service);

    let mut record = Record::with_id("account", rid("42")).attribute("name", "Same Corp");
    container.save(&mut record).expect("save");

    assert!(matches!(service.calls()[0], Call::Update(_)));
}

#[test]
fn delete_without_an_id_is_a_no_op() {
    let service = Arc::new(ScriptedService::new());
    let (container, _) = build(ContextBuilder::new(message::DELETE, "account"), &service);

    container
        .delete(&Record::new("account"))
        .expect("no-op delete");

    assert!(service.calls().is_empty());
}

#[test]
fn reload_rejects_aliased_columns_before_any_call() {
    let service = Arc::new(ScriptedService::new());
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let mut record = Record::with_id("contact", rid("1"));
    let err = container
        .reload(&mut record, &FieldSet::columns(["owner.fullname"]))
        .expect_err("aliased");

    assert!(matches!(err, Error::AliasedField { .. }));
    assert!(service.calls().is_empty());
}

#[test]
fn reload_replaces_the_record_with_the_fetched_state() {
    let service = Arc::new(ScriptedService::new());
    service.script_retrieve(Ok(
        Record::with_id("contact", rid("1")).attribute("firstname", "Fresh")
    ));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let mut record = Record::with_id("contact", rid("1")).attribute("firstname", "Stale");
    container
        .reload(&mut record, &FieldSet::All)
        .expect("reload");

    assert_eq!(record.get("firstname"), Some(&Value::Text("Fresh".into())));
}

#[test]
fn ensure_fetches_only_the_missing_columns() {
    let service = Arc::new(ScriptedService::new());
    service.script_retrieve(Ok(
        Record::with_id("contact", rid("1")).attribute("lastname", "Lee")
    ));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let mut record = Record::with_id("contact", rid("1")).attribute("firstname", "Ann");
    container
        .ensure(&mut record, &FieldSet::columns(["firstname", "lastname"]))
        .expect("ensure");

    match &service.calls()[0] {
        Call::Retrieve { fields, .. } => {
            assert_eq!(fields, &FieldSet::columns(["lastname"]));
        }
        other => panic!("unexpected call {other:?}"),
    }
    assert_eq!(record.get("firstname"), Some(&Value::Text("Ann".into())));
    assert_eq!(record.get("lastname"), Some(&Value::Text("Lee".into())));
}

#[test]
fn ensure_with_everything_present_makes_no_call() {
    let service = Arc::new(ScriptedService::new());
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let mut record = Record::with_id("contact", rid("1")).attribute("firstname", "Ann");
    container
        .ensure(&mut record, &FieldSet::columns(["firstname"]))
        .expect("ensure");

    assert!(service.calls().is_empty());
}

#[test]
fn assign_patches_the_owner_attribute_only() {
    let service = Arc::new(ScriptedService::new());
    service.script_update(Ok(()));
    let (container, _) = build(ContextBuilder::new("Assign", "account"), &service);

    let record = Record::with_id("account", rid("1")).attribute("name", "Untouched");
    let owner = RecordRef::new("systemuser", rid("5"));
    container.assign(&record, &owner).expect("assign");

    match &service.calls()[0] {
        Call::Update(patch) => {
            assert_eq!(patch.id, rid("1"));
            assert_eq!(patch.attributes.len(), 1);
            assert_eq!(
                patch.get("ownerid"),
                Some(&Value::Reference(owner.clone()))
            );
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn set_state_sends_the_record_moniker() {
    let service = Arc::new(ScriptedService::new());
    service.script_unit();
    let (container, _) = build(ContextBuilder::new(message::SET_STATE, "quote"), &service);

    let record = Record::with_id("quote", rid("3"));
    container.set_state(&record, 1, 2).expect("set state");

    let executed = service.executed();
    assert_eq!(executed.len(), 1);
    match &executed[0] {
        mezza::core::service::ServiceRequest::SetState {
            target,
            state,
            status,
        } => {
            assert_eq!(target.entity, "quote");
            assert_eq!(target.id, rid("3"));
            assert_eq!((*state, *status), (1, 2));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn retrieve_first_asks_for_a_single_record_page() {
    let service = Arc::new(ScriptedService::new());
    service.script_page(Ok(RecordSet::from_records(
        "contact",
        vec![Record::with_id("contact", rid("1"))],
    )));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let query = Query::new("contact")
        .criteria(Filter::and().condition(Condition::equal("statecode", 0)));
    let first = container.retrieve_first(query).expect("retrieve first");

    assert!(first.is_some());
    let sent = &service.queries()[0];
    let page = sent.page.clone().expect("page forced");
    assert_eq!((page.number, page.size), (1, 1));
}

#[test]
fn display_string_prefers_the_primary_name_attribute() {
    let service = Arc::new(ScriptedService::new());
    service.script_schema(EntitySchema::new("account", "accountid", "name"));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "account"), &service);

    let named = Record::with_id("account", rid("1")).attribute("name", "Big Corp");
    assert_eq!(
        container.display_string(&named).expect("named"),
        "account (Big Corp)"
    );

    // Second lookup hits the cache; no further schema request.
    let anonymous = Record::with_id("account", rid("1"));
    assert_eq!(
        container.display_string(&anonymous).expect("anonymous"),
        format!("account ({})", rid("1"))
    );
    assert_eq!(service.executed().len(), 1);
}

#[test]
fn platform_version_reads_the_version_response() {
    let service = Arc::new(ScriptedService::new());
    service.script_version("9.2.0.1");
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "account"), &service);

    assert_eq!(container.platform_version().expect("version"), "9.2.0.1");
}

#[test]
fn remote_failures_propagate_unchanged() {
    let service = Arc::new(ScriptedService::new());
    service.script_retrieve(Err(ServiceError::NotFound {
        entity: "contact".into(),
        id: rid("1").to_string(),
    }));
    let (container, _) = build(ContextBuilder::new(message::UPDATE, "contact"), &service);

    let err = container
        .retrieve("contact", rid("1"), &FieldSet::All)
        .expect_err("propagates");

    assert!(matches!(
        err,
        Error::Service(ServiceError::NotFound { .. })
    ));
}

#[test]
fn remote_operations_trace_indented_sections() {
    let service = Arc::new(ScriptedService::new());
    service.script_create(Ok(rid("42")));
    let (container, sink) = build(ContextBuilder::new(message::CREATE, "account"), &service);

    container.trace("handler start");
    let mut record = Record::new("account");
    container.save(&mut record).expect("save");
    container.trace("handler end");

    assert_eq!(sink.lines(), vec!["handler start", "create", "handler end"]);
}

#[test]
fn shared_config_shares_the_schema_cache_across_containers() {
    let service = Arc::new(ScriptedService::new());
    service.script_schema(EntitySchema::new("account", "accountid", "name"));
    let config = ContainerConfig::default();
    let sink = Arc::new(MemorySink::new());

    let first = ExecutionContainer::with_config(
        ContextBuilder::new(message::UPDATE, "account").boxed(),
        service.clone(),
        sink.clone(),
        config.clone(),
    );
    let second = ExecutionContainer::with_config(
        ContextBuilder::new(message::DELETE, "account").boxed(),
        service.clone(),
        sink,
        config,
    );

    first.primary_id_attribute("account").expect("first");
    second.primary_id_attribute("account").expect("second");

    assert_eq!(service.executed().len(), 1);
}
