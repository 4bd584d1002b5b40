use crate::types::{RecordId, RecordRef, Value};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Record
///
/// One record: type name, id, and a map of named attribute values. The id
/// lives outside the attribute map; the platform additionally mirrors it
/// into an `{entity}id` attribute, which [`Record::merge`] treats as
/// redundant.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
    pub entity: String,
    pub id: RecordId,
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self::with_id(entity, RecordId::UNSET)
    }

    #[must_use]
    pub fn with_id(entity: impl Into<String>, id: RecordId) -> Self {
        Self {
            entity: entity.into(),
            id,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Attribute is present, null or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute is present and holds a non-null value.
    #[must_use]
    pub fn contains_value(&self, name: &str) -> bool {
        self.attributes.get(name).is_some_and(|v| !v.is_null())
    }

    /// Builder-style attribute assignment for literals and fixtures.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn to_ref(&self) -> RecordRef {
        RecordRef::new(self.entity.clone(), self.id)
    }

    /// merge
    /// First writer wins: a clone of `self` with every attribute of `other`
    /// added where `self` has none. The `{entity}id` attribute mirroring
    /// this record's own id is dropped from the clone; ids themselves are
    /// never merged.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let redundant = format!("{}id", self.entity);

        let mut merged = Self::with_id(self.entity.clone(), self.id);
        for (name, value) in &self.attributes {
            if *name == redundant && *value == Value::Guid(self.id) {
                continue;
            }
            merged.attributes.insert(name.clone(), value.clone());
        }

        for (name, value) in &other.attributes {
            merged
                .attributes
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }

        merged
    }

    /// Base form of an attribute value, wrappers stripped. `None` for
    /// absent attributes and explicit nulls alike.
    #[must_use]
    pub fn base_value(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).and_then(Value::to_base)
    }

    /// One-line rendering of an attribute for trace output.
    #[must_use]
    pub fn attribute_display(&self, name: &str) -> String {
        self.attributes
            .get(name)
            .map_or_else(String::new, ToString::to_string)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.entity, self.id)
    }
}

///
/// RecordSet
///
/// One page of query results, or a fully drained result when produced by
/// the paged retriever (`more_records` false, no cookie).
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, IntoIterator, PartialEq, Serialize)]
pub struct RecordSet {
    pub entity: Option<String>,
    #[deref]
    #[deref_mut]
    #[into_iterator(owned, ref)]
    pub records: Vec<Record>,
    pub more_records: bool,
    pub paging_cookie: Option<String>,
}

impl RecordSet {
    #[must_use]
    pub fn from_records(entity: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            entity: Some(entity.into()),
            records,
            more_records: false,
            paging_cookie: None,
        }
    }
}

///
/// TESTS
///
