//! End-to-end relationship retrieval against an in-memory service,
//! exercising the crate surface the way a transport adapter would.

use mezza_core::{
    error::ServiceError,
    metadata::{EntitySchema, SchemaCache},
    query::{FieldSet, Query},
    relations::{ActiveStates, RelatedQuery, Relationship},
    service::{DataService, ServiceRequest, ServiceResponse},
    types::{Record, RecordId, RecordRef, RecordSet, Value},
};
use std::sync::{Mutex, PoisonError};

/// Serves a fixed record list one record per page, so a handful of rows
/// exercises the whole paging loop.
struct TrickleService {
    records: Vec<Record>,
    schema_requests: Mutex<usize>,
}

impl TrickleService {
    fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            schema_requests: Mutex::new(0),
        }
    }

    fn schema_requests(&self) -> usize {
        *self
            .schema_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DataService for TrickleService {
    fn create(&self, _: &Record) -> Result<RecordId, ServiceError> {
        unimplemented!("not used by this test")
    }

    fn retrieve(&self, _: &str, _: RecordId, _: &FieldSet) -> Result<Record, ServiceError> {
        unimplemented!("not used by this test")
    }

    fn update(&self, _: &Record) -> Result<(), ServiceError> {
        unimplemented!("not used by this test")
    }

    fn delete(&self, _: &str, _: RecordId) -> Result<(), ServiceError> {
        unimplemented!("not used by this test")
    }

    fn retrieve_multiple(&self, query: &Query) -> Result<RecordSet, ServiceError> {
        let page = query.page.as_ref().ok_or_else(|| ServiceError::Fault {
            message: "paging required".into(),
        })?;

        let index = (page.number - 1) as usize;
        let record = self.records.get(index).cloned();
        let more = index + 1 < self.records.len();

        Ok(RecordSet {
            entity: Some(query.entity.clone()),
            records: record.into_iter().collect(),
            more_records: more,
            paging_cookie: more.then(|| format!("page-{}", page.number)),
        })
    }

    fn execute(&self, request: &ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        match request {
            ServiceRequest::EntitySchema { entity } => {
                let mut count = self
                    .schema_requests
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                *count += 1;
                Ok(ServiceResponse::EntitySchema(EntitySchema::new(
                    entity.clone(),
                    format!("{entity}id"),
                    "name",
                )))
            }
            _ => Err(ServiceError::Fault {
                message: "unsupported".into(),
            }),
        }
    }
}

fn member(n: u32) -> Record {
    Record::with_id("systemuser", RecordId::coerce(&format!("{n:x}")))
        .attribute("fullname", format!("User {n}"))
}

#[test]
fn intersect_retrieval_drains_every_page_and_caches_schema() {
    let service = TrickleService::new(vec![member(1), member(2), member(3)]);
    let cache = SchemaCache::new();
    let active = ActiveStates::default();

    let parent = RecordRef::new("team", RecordId::coerce("aa"));
    let query = RelatedQuery::new(
        parent,
        Relationship::intersect("systemuser", "teammembership"),
    )
    .fields(FieldSet::columns(["fullname"]));

    let result = query.execute(&service, &cache, &active).expect("first run");
    assert_eq!(result.len(), 3);
    assert!(!result.more_records);
    assert_eq!(
        result.records[2].get("fullname"),
        Some(&Value::Text("User 3".into()))
    );

    // Second run: both primary-key lookups come from the cache.
    let lookups_after_first = service.schema_requests();
    query.execute(&service, &cache, &active).expect("second run");
    assert_eq!(service.schema_requests(), lookups_after_first);
    assert_eq!(lookups_after_first, 2);
}
