use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RecordRef
///
/// Weak reference to a record: type and id, optionally a display name the
/// platform attached. Carries no attributes.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RecordRef {
    pub entity: String,
    pub id: RecordId,
    pub name: Option<String>,
}

impl RecordRef {
    #[must_use]
    pub fn new(entity: impl Into<String>, id: RecordId) -> Self {
        Self {
            entity: entity.into(),
            id,
            name: None,
        }
    }

    #[must_use]
    pub fn named(entity: impl Into<String>, id: RecordId, name: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            id,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({name})", self.entity),
            None => write!(f, "{} ({})", self.entity, self.id),
        }
    }
}
