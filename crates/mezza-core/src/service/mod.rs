mod request;
mod retrieve;

pub use request::{RelationshipName, RelationshipRole, ServiceRequest, ServiceResponse};
pub use retrieve::{retrieve_all, retrieve_all_with};

use crate::{
    error::ServiceError,
    query::{FieldSet, Query},
    types::{Record, RecordId, RecordSet},
};

///
/// DataService
///
/// The remote record service, as the host's transport exposes it.
/// Synchronous by contract; timeouts and retries are the transport's
/// business, this library never retries.
///
/// Implementations return [`ServiceError`] so callers can classify remote
/// failures without parsing messages.
///

pub trait DataService: Send + Sync {
    fn create(&self, record: &Record) -> Result<RecordId, ServiceError>;

    fn retrieve(
        &self,
        entity: &str,
        id: RecordId,
        fields: &FieldSet,
    ) -> Result<Record, ServiceError>;

    fn update(&self, record: &Record) -> Result<(), ServiceError>;

    fn delete(&self, entity: &str, id: RecordId) -> Result<(), ServiceError>;

    /// One page of results; paging intent travels on the query.
    fn retrieve_multiple(&self, query: &Query) -> Result<RecordSet, ServiceError>;

    /// Named operations beyond CRUD (associate, set-state, metadata, ...).
    fn execute(&self, request: &ServiceRequest) -> Result<ServiceResponse, ServiceError>;
}
