use crate::types::{Record, RecordId, RecordRef, Value};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// ParamValue
///
/// Shape of one context parameter. Hosts populate these from the raw
/// property bags; the typed accessors on [`Parameters`] read them back
/// without failing on mismatches.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ParamValue {
    Id(RecordId),
    Record(Record),
    Reference(RecordRef),
    Value(Value),
}

impl From<RecordId> for ParamValue {
    fn from(v: RecordId) -> Self {
        Self::Id(v)
    }
}

impl From<Record> for ParamValue {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl From<RecordRef> for ParamValue {
    fn from(v: RecordRef) -> Self {
        Self::Reference(v)
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

///
/// Parameters
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, PartialEq, Serialize)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full record under the name, `None` for weak references and other
    /// shapes. Mirrors the strictness of the resolution table: a row that
    /// wants a record never falls back to a reference.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        match self.0.get(name) {
            Some(ParamValue::Record(r)) => Some(r),
            _ => None,
        }
    }

    /// Weak reference under the name, `None` for any other shape.
    #[must_use]
    pub fn reference(&self, name: &str) -> Option<&RecordRef> {
        match self.0.get(name) {
            Some(ParamValue::Reference(r)) => Some(r),
            _ => None,
        }
    }

    /// Plain id under the name, whether stored directly or as a guid value.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<RecordId> {
        match self.0.get(name) {
            Some(ParamValue::Id(id)) => Some(*id),
            Some(ParamValue::Value(Value::Guid(id))) => Some(*id),
            _ => None,
        }
    }

    /// Builder-style insert used by adapters and fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}
