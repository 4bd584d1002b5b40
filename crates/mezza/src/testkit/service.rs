use mezza_core::{
    error::ServiceError,
    metadata::EntitySchema,
    query::{FieldSet, Query},
    service::{DataService, ServiceRequest, ServiceResponse},
    types::{Record, RecordId, RecordSet},
};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

///
/// Call
///
/// One recorded service invocation, in the shape the library sent it.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create(Record),
    Retrieve {
        entity: String,
        id: RecordId,
        fields: FieldSet,
    },
    Update(Record),
    Delete {
        entity: String,
        id: RecordId,
    },
    RetrieveMultiple(Query),
    Execute(ServiceRequest),
}

///
/// ScriptedService
///
/// Programmable [`DataService`] for handler tests: script results per
/// method in FIFO order, then assert on the recorded calls. Unscripted
/// calls fail with a transport error naming the method, so a test never
/// silently passes through the wrong path.
///

#[derive(Default)]
pub struct ScriptedService {
    creates: Mutex<VecDeque<Result<RecordId, ServiceError>>>,
    retrieves: Mutex<VecDeque<Result<Record, ServiceError>>>,
    updates: Mutex<VecDeque<Result<(), ServiceError>>>,
    deletes: Mutex<VecDeque<Result<(), ServiceError>>>,
    pages: Mutex<VecDeque<Result<RecordSet, ServiceError>>>,
    executions: Mutex<VecDeque<Result<ServiceResponse, ServiceError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- scripting

    pub fn script_create(&self, result: Result<RecordId, ServiceError>) {
        lock(&self.creates).push_back(result);
    }

    pub fn script_retrieve(&self, result: Result<Record, ServiceError>) {
        lock(&self.retrieves).push_back(result);
    }

    pub fn script_update(&self, result: Result<(), ServiceError>) {
        lock(&self.updates).push_back(result);
    }

    pub fn script_delete(&self, result: Result<(), ServiceError>) {
        lock(&self.deletes).push_back(result);
    }

    pub fn script_page(&self, result: Result<RecordSet, ServiceError>) {
        lock(&self.pages).push_back(result);
    }

    pub fn script_execute(&self, result: Result<ServiceResponse, ServiceError>) {
        lock(&self.executions).push_back(result);
    }

    /// Next `execute` returns this entity schema.
    pub fn script_schema(&self, schema: EntitySchema) {
        self.script_execute(Ok(ServiceResponse::EntitySchema(schema)));
    }

    /// Next `execute` succeeds with no payload.
    pub fn script_unit(&self) {
        self.script_execute(Ok(ServiceResponse::Unit));
    }

    pub fn script_version(&self, version: impl Into<String>) {
        self.script_execute(Ok(ServiceResponse::Version(version.into())));
    }

    // --- assertions

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// The retrieve-multiple queries seen so far.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                Call::RetrieveMultiple(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// The executed named requests seen so far.
    #[must_use]
    pub fn executed(&self) -> Vec<ServiceRequest> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                Call::Execute(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn record_call(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    fn unscripted(method: &str) -> ServiceError {
        ServiceError::Transport {
            message: format!("unscripted {method} call"),
        }
    }
}

impl DataService for ScriptedService {
    fn create(&self, record: &Record) -> Result<RecordId, ServiceError> {
        self.record_call(Call::Create(record.clone()));
        lock(&self.creates)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("create")))
    }

    fn retrieve(
        &self,
        entity: &str,
        id: RecordId,
        fields: &FieldSet,
    ) -> Result<Record, ServiceError> {
        self.record_call(Call::Retrieve {
            entity: entity.to_string(),
            id,
            fields: fields.clone(),
        });
        lock(&self.retrieves)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("retrieve")))
    }

    fn update(&self, record: &Record) -> Result<(), ServiceError> {
        self.record_call(Call::Update(record.clone()));
        lock(&self.updates)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("update")))
    }

    fn delete(&self, entity: &str, id: RecordId) -> Result<(), ServiceError> {
        self.record_call(Call::Delete {
            entity: entity.to_string(),
            id,
        });
        lock(&self.deletes)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("delete")))
    }

    fn retrieve_multiple(&self, query: &Query) -> Result<RecordSet, ServiceError> {
        self.record_call(Call::RetrieveMultiple(query.clone()));
        lock(&self.pages)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("retrieve_multiple")))
    }

    fn execute(&self, request: &ServiceRequest) -> Result<ServiceResponse, ServiceError> {
        self.record_call(Call::Execute(request.clone()));
        lock(&self.executions)
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("execute")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
