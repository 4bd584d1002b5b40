use crate::types::{Record, RecordId, RecordRef};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Choice
///
/// Typed option-set value. Only the numeric member travels on the wire;
/// display labels belong to formatted output, which this library does not
/// model.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct Choice(pub i32);

impl Choice {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Choice {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

///
/// Value
///
/// One attribute value.
///
/// Null → the attribute is present and explicitly empty. Presence matters:
/// a Null set on a target view shadows older snapshot values during merge.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Choice(Choice),
    /// Nested records, used by multi-party attributes.
    Collection(Vec<Record>),
    DateTime(DateTime<Utc>),
    Decimal(Decimal),
    Float(f64),
    Guid(RecordId),
    Int(i64),
    Money(Decimal),
    Null,
    Reference(RecordRef),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_guid(&self) -> Option<RecordId> {
        match self {
            Self::Guid(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_choice(&self) -> Option<Choice> {
        match self {
            Self::Choice(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&RecordRef> {
        match self {
            Self::Reference(v) => Some(v),
            _ => None,
        }
    }

    /// to_base
    /// Strips platform wrappers down to the plain value underneath:
    /// references to their id, choices to their number, money to its
    /// decimal. `Null` has no base value.
    #[must_use]
    pub fn to_base(&self) -> Option<Self> {
        match self {
            Self::Null => None,
            Self::Reference(r) => Some(Self::Guid(r.id)),
            Self::Choice(c) => Some(Self::Int(i64::from(c.value()))),
            Self::Money(m) => Some(Self::Decimal(*m)),
            other => Some(other.clone()),
        }
    }

    /// State value of a `statecode`-style attribute, whichever shape the
    /// transport delivered it in.
    #[must_use]
    pub fn as_state(&self) -> Option<i32> {
        match self {
            Self::Choice(c) => Some(c.value()),
            Self::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Choice(c) => write!(f, "{}", c.value()),
            Self::Collection(records) => write!(f, "[{} records]", records.len()),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Decimal(v) | Self::Money(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Guid(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => Ok(()),
            Self::Reference(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<RecordId> for Value {
    fn from(v: RecordId) -> Self {
        Self::Guid(v)
    }
}

impl From<RecordRef> for Value {
    fn from(v: RecordRef) -> Self {
        Self::Reference(v)
    }
}

impl From<Choice> for Value {
    fn from(v: Choice) -> Self {
        Self::Choice(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

///
/// TESTS
///
