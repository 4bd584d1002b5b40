//! Shared fixtures for in-crate unit tests.

use crate::{
    context::{ExecutionContext, Parameters, ProcessingStage},
    error::ServiceError,
    metadata::EntitySchema,
    query::{FieldSet, Query},
    service::{DataService, ServiceRequest, ServiceResponse},
    types::{Record, RecordId, RecordSet},
};
use std::{
    collections::VecDeque,
    sync::Mutex,
};

///
/// FakeContext
///

pub(crate) struct FakeContext {
    pub message: String,
    pub stage: ProcessingStage,
    pub entity: String,
    pub entity_id: RecordId,
    pub inputs: Parameters,
    pub outputs: Parameters,
    pub pre: Option<Record>,
    pub post: Option<Record>,
}

impl FakeContext {
    pub fn new(message: &str, stage: ProcessingStage, entity: &str) -> Self {
        Self {
            message: message.to_string(),
            stage,
            entity: entity.to_string(),
            entity_id: RecordId::UNSET,
            inputs: Parameters::new(),
            outputs: Parameters::new(),
            pre: None,
            post: None,
        }
    }
}

impl ExecutionContext for FakeContext {
    fn message_name(&self) -> &str {
        &self.message
    }

    fn stage(&self) -> ProcessingStage {
        self.stage
    }

    fn primary_entity_name(&self) -> &str {
        &self.entity
    }

    fn primary_entity_id(&self) -> RecordId {
        self.entity_id
    }

    fn input_parameters(&self) -> &Parameters {
        &self.inputs
    }

    fn output_parameters(&self) -> &Parameters {
        &self.outputs
    }

    fn pre_image(&self) -> Option<&Record> {
        self.pre.as_ref()
    }

    fn post_image(&self) -> Option<&Record> {
        self.post.as_ref()
    }
}

///
/// StubService
///
/// Scripted [`DataService`]: every call pops the next scripted result for
/// its method and logs what it was asked. Unscripted calls fail loudly so a
/// test never silently exercises the wrong path.
///

#[derive(Default)]
pub(crate) struct StubService {
    retrieves: Mutex<VecDeque<Result<Record, ServiceError>>>,
    pages: Mutex<VecDeque<Result<RecordSet, ServiceError>>>,
    executions: Mutex<VecDeque<Result<ServiceResponse, ServiceError>>>,
    pub queries: Mutex<Vec<Query>>,
    pub requests: Mutex<Vec<ServiceRequest>>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_retrieve(&self, result: Result<Record, ServiceError>) {
        self.retrieves.lock().expect("lock").push_back(result);
    }

    pub fn script_page(&self, result: Result<RecordSet, ServiceError>) {
        self.pages.lock().expect("lock").push_back(result);
    }

    pub fn script_execute(&self, result: Result<ServiceResponse, ServiceError>) {
        self.executions.lock().expect("lock").push_back(result);
    }

    pub fn script_schema(&self, schema: EntitySchema) {
        self.script_execute(Ok(ServiceResponse::EntitySchema(schema)));
    }

    pub fn queries_seen(&self) -> Vec<Query> {
        self.queries.lock().expect("lock").clone()
    }

    pub fn requests_seen(&self) -> Vec<ServiceRequest> {
        self.requests.lock().expect("lock").clone()
    }

    fn unscripted(method: &str) -> ServiceError {
        ServiceError::Transport {
            message: format!("unscripted {method} call"),
        }
    }
}

impl DataService for StubService {
    fn create(&self, record: &Record) -> Result<RecordId, ServiceError> {
        let _ = record;
        Err(Self::unscripted("create"))
    }

    fn retrieve(&self, _: &str, _: RecordId, _: &FieldSet) -> Result<Record, ServiceError> {
        self.retrieves
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("retrieve")))
    }

    fn update(&self, record: &Record) -> Result<(), ServiceError> {
        let _ = record;
        Err(Self::unscripted("update"))
    }

    fn delete(&self, _: &str, _: RecordId) -> Result<(), ServiceError> {
        Err(Self::unscripted("delete"))
    }

    fn retrieve_multiple(&self, query: &Query) -> Result<RecordSet, ServiceError> {
        self.queries.lock().expect("lock").push(query.clone());
        self.pages
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("retrieve_multiple")))
    }

    fn execute(&self, request: &ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.executions
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("execute")))
    }
}

/// Conventional schema fixture: `{entity}id` / `name` primary attributes.
pub(crate) fn schema_for(entity: &str) -> EntitySchema {
    EntitySchema::new(entity, format!("{entity}id"), "name")
}
