//! Relationship queries and association writes driven through the
//! container.

use mezza::{
    ContainerConfig, ExecutionContainer,
    core::{
        context::message,
        error::Error,
        metadata::EntitySchema,
        query::{FieldSet, OrderBy},
        relations::Relationship,
        service::{RelationshipRole, ServiceRequest},
        trace::MemorySink,
        types::{Record, RecordId, RecordRef, RecordSet},
    },
    testkit::{ContextBuilder, ScriptedService},
};
use std::sync::Arc;

fn rid(fragment: &str) -> RecordId {
    RecordId::coerce(fragment)
}

fn container_with(
    service: &Arc<ScriptedService>,
    config: ContainerConfig,
) -> ExecutionContainer {
    ExecutionContainer::with_config(
        ContextBuilder::new(message::UPDATE, "account").boxed(),
        service.clone(),
        Arc::new(MemorySink::new()),
        config,
    )
}

#[test]
fn direct_relationship_retrieval_pages_to_completion() {
    let service = Arc::new(ScriptedService::new());
    service.script_page(Ok(RecordSet {
        entity: Some("contact".into()),
        records: vec![Record::with_id("contact", rid("1"))],
        more_records: true,
        paging_cookie: Some("c1".into()),
    }));
    service.script_page(Ok(RecordSet::from_records(
        "contact",
        vec![Record::with_id("contact", rid("2"))],
    )));
    let container = container_with(&service, ContainerConfig::default());

    let parent = RecordRef::new("account", rid("9"));
    let query = container
        .related(&parent, Relationship::direct("contact", "parentcustomerid"))
        .fields(FieldSet::columns(["fullname"]))
        .order_by(OrderBy::asc("fullname"))
        .only_active(true);
    let result = container.retrieve_related(&query).expect("retrieve");

    assert_eq!(result.len(), 2);
    let queries = service.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].entity, "contact");
    assert_eq!(queries[1].page.as_ref().map(|p| p.number), Some(2));
    assert_eq!(
        queries[1].page.as_ref().and_then(|p| p.cookie.clone()),
        Some("c1".into())
    );
}

#[test]
fn self_referential_intersect_composes_through_the_shared_cache() {
    let service = Arc::new(ScriptedService::new());
    service.script_schema(EntitySchema::new("contact", "contactid", "fullname"));
    service.script_page(Ok(RecordSet::from_records(
        "contact",
        vec![Record::with_id("contact", rid("2"))],
    )));
    let container = container_with(&service, ContainerConfig::default());

    let parent = RecordRef::new("contact", rid("1"));
    let query = container.related(&parent, Relationship::intersect("contact", "contactleads"));
    container.retrieve_related(&query).expect("retrieve");

    let sent = &service.queries()[0];
    let link = &sent.links[0];
    assert_eq!(link.to_attribute, "contactidtwo");
    assert_eq!(link.criteria.conditions[0].attribute, "contactidone");

    // Running the same query again reuses the cached schema.
    service.script_page(Ok(RecordSet::from_records("contact", Vec::new())));
    container.retrieve_related(&query).expect("second run");
    assert_eq!(service.executed().len(), 1);
}

#[test]
fn association_uses_the_configured_batch_size() {
    let service = Arc::new(ScriptedService::new());
    for _ in 0..3 {
        service.script_unit();
    }
    let config = ContainerConfig {
        batch_size: Some(2),
        ..ContainerConfig::default()
    };
    let container = container_with(&service, config);

    let parent = RecordRef::new("account", rid("9"));
    let related: Vec<RecordRef> = (1..=5)
        .map(|n| RecordRef::new("contact", rid(&format!("{n:x}"))))
        .collect();
    container
        .associate(&parent, &related, "account_contacts")
        .expect("associate");

    let executed = service.executed();
    assert_eq!(executed.len(), 3);
    let sizes: Vec<usize> = executed
        .iter()
        .map(|request| match request {
            ServiceRequest::Associate { related, .. } => related.len(),
            other => panic!("unexpected request {other:?}"),
        })
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn disassociation_of_same_type_records_carries_the_role() {
    let service = Arc::new(ScriptedService::new());
    service.script_unit();
    let container = container_with(&service, ContainerConfig::default());

    let parent = RecordRef::new("contact", rid("1"));
    let related = vec![RecordRef::new("contact", rid("2"))];
    container
        .disassociate(&parent, &related, "contactleads")
        .expect("disassociate");

    match &service.executed()[0] {
        ServiceRequest::Disassociate { relationship, .. } => {
            assert_eq!(relationship.name, "contactleads");
            assert_eq!(relationship.role, Some(RelationshipRole::Referencing));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn association_config_errors_fail_before_the_service() {
    let service = Arc::new(ScriptedService::new());
    let config = ContainerConfig {
        batch_size: Some(0),
        ..ContainerConfig::default()
    };
    let container = container_with(&service, config);

    let parent = RecordRef::new("account", rid("9"));
    let related = vec![RecordRef::new("contact", rid("1"))];
    let err = container
        .associate(&parent, &related, "account_contacts")
        .expect_err("batch size");

    assert!(matches!(err, Error::BatchSize));
    assert!(service.calls().is_empty());
}

#[test]
fn overridden_active_states_shape_the_related_query() {
    let service = Arc::new(ScriptedService::new());
    service.script_page(Ok(RecordSet::from_records("custom_job", Vec::new())));
    let mut config = ContainerConfig::default();
    config.active_states.set_states("custom_job", [0, 5]);
    let container = container_with(&service, config);

    let parent = RecordRef::new("account", rid("9"));
    let query = container
        .related(&parent, Relationship::direct("custom_job", "accountid"))
        .only_active(true);
    container.retrieve_related(&query).expect("retrieve");

    let sent = &service.queries()[0];
    let statecode = sent
        .criteria
        .conditions
        .iter()
        .find(|c| c.attribute == "statecode")
        .expect("state condition");
    assert_eq!(statecode.values.len(), 2);
}
