mod id;
mod record;
mod reference;
mod value;

pub use id::RecordId;
pub use record::{Record, RecordSet};
pub use reference::RecordRef;
pub use value::{Choice, Value};
