mod active;
mod descriptor;
mod links;
mod related;

pub use active::ActiveStates;
pub use descriptor::Relationship;
pub use links::{associate, disassociate};
pub use related::{RelatedQuery, related_record};
