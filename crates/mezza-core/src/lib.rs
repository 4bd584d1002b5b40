//! Core runtime for Mezza: record types, execution-context views, the schema
//! cache, the relationship query engine, paged retrieval, and the tracing
//! seam exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod context;
pub mod error;
pub mod metadata;
pub mod query;
pub mod relations;
pub mod service;
pub mod trace;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Records fetched per page when driving a query to completion.
pub const DEFAULT_PAGE_SIZE: u32 = 5000;

/// Round-trip ceiling for paged retrieval.
///
/// A server that keeps reporting more records past this point is treated as
/// broken rather than looped on forever.
pub const MAX_PAGES: u32 = 1000;

/// Sliding lifetime of a schema cache entry.
pub const DEFAULT_SCHEMA_TTL_SECS: u64 = 300;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, cache internals, or trace plumbing are re-exported here.
///

pub mod prelude {
    pub use crate::{
        context::{ExecutionContext, ProcessingStage, RecordViews},
        query::{Comparator, FieldSet, Filter, OrderBy, Query},
        relations::Relationship,
        service::DataService,
        types::{Record, RecordId, RecordRef, RecordSet, Value},
    };
}
