use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Library-level failure raised by context resolution, relationship
/// composition, batching, and paged retrieval. Remote failures travel
/// inside [`Error::Service`] unchanged.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("batch size must be greater than zero")]
    BatchSize,

    #[error("parent record of type '{entity}' has no id")]
    UnsetParentId { entity: String },

    #[error("field '{attribute}' is an aliased join column and cannot be re-fetched")]
    AliasedField { attribute: String },

    #[error("paging did not terminate after {pages} round trips")]
    PageOverrun { pages: u32 },

    #[error("record of type '{entity}' has no attribute '{attribute}'")]
    MissingAttribute { entity: String, attribute: String },

    #[error("record of type '{entity}' has no id to operate on")]
    UnsetRecordId { entity: String },

    #[error("service returned an unexpected response shape for {request}")]
    UnexpectedResponse { request: &'static str },

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl Error {
    /// Broad classification used by hosts to decide retry/abort handling.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::BatchSize
            | Self::UnsetParentId { .. }
            | Self::AliasedField { .. }
            | Self::MissingAttribute { .. }
            | Self::UnsetRecordId { .. }
            | Self::Stage(_) => ErrorClass::InvalidInput,
            Self::PageOverrun { .. } | Self::UnexpectedResponse { .. } => ErrorClass::Contract,
            Self::Service(_) => ErrorClass::Service,
        }
    }
}

///
/// ErrorClass
/// Coarse taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Caller handed the library something unusable; no remote call was made.
    InvalidInput,
    /// The remote side broke the service contract (shape, termination).
    Contract,
    /// A remote call failed; see the wrapped [`ServiceError`].
    Service,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::Contract => "contract",
            Self::Service => "service",
        };
        write!(f, "{label}")
    }
}

///
/// StageError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("unknown processing stage code {0}")]
pub struct StageError(pub u8);

///
/// ServiceError
///
/// What [`DataService`](crate::service::DataService) implementations return.
/// The variants are the classifications this library acts on; transports
/// fold their own failure detail into the message fields.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ServiceError {
    #[error("unknown record type '{entity}'")]
    UnknownEntity { entity: String },

    #[error("record {entity} ({id}) does not exist")]
    NotFound { entity: String, id: String },

    #[error("platform fault: {message}")]
    Fault { message: String },

    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl ServiceError {
    #[must_use]
    pub const fn is_unknown_entity(&self) -> bool {
        matches!(self, Self::UnknownEntity { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
