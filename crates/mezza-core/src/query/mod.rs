mod fields;
mod filter;
mod link;
mod order;
mod query;

pub use fields::FieldSet;
pub use filter::{Comparator, Condition, Filter, FilterKind};
pub use link::Link;
pub use order::{Direction, OrderBy};
pub use query::{PageInfo, Query};
