mod cache;
mod schema;

pub use cache::{SchemaCache, TimeSource};
pub use schema::{EntitySchema, FieldKind, FieldSchema};
