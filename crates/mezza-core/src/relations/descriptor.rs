use serde::{Deserialize, Serialize};

///
/// Relationship
///
/// How two record types are connected: a foreign key on the child side,
/// or an intersect record type sitting between the two sides of an N:N.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Relationship {
    /// 1:N — `child` rows carry `foreign_key` pointing at the parent.
    Direct { child: String, foreign_key: String },
    /// N:N — rows of `other` linked to the parent through the `via`
    /// intersect record type.
    Intersect { other: String, via: String },
}

impl Relationship {
    #[must_use]
    pub fn direct(child: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        Self::Direct {
            child: child.into(),
            foreign_key: foreign_key.into(),
        }
    }

    #[must_use]
    pub fn intersect(other: impl Into<String>, via: impl Into<String>) -> Self {
        Self::Intersect {
            other: other.into(),
            via: via.into(),
        }
    }

    /// Record type the composed query runs against.
    #[must_use]
    pub const fn result_entity(&self) -> &String {
        match self {
            Self::Direct { child, .. } => child,
            Self::Intersect { other, .. } => other,
        }
    }
}
