use crate::types::Value;
use serde::{Deserialize, Serialize};

///
/// Comparator
///
/// Condition operators the remote service understands. `Null`/`NotNull`
/// take no values; `In`/`NotIn` take any number; the rest take one.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Like,
    In,
    NotIn,
    Null,
    NotNull,
}

///
/// Condition
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Condition {
    pub attribute: String,
    pub comparator: Comparator,
    pub values: Vec<Value>,
}

impl Condition {
    #[must_use]
    pub fn new(
        attribute: impl Into<String>,
        comparator: Comparator,
        values: Vec<Value>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            comparator,
            values,
        }
    }

    #[must_use]
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute, Comparator::Equal, vec![value.into()])
    }

    #[must_use]
    pub fn is_in<I, V>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(
            attribute,
            Comparator::In,
            values.into_iter().map(Into::into).collect(),
        )
    }

    #[must_use]
    pub fn null(attribute: impl Into<String>) -> Self {
        Self::new(attribute, Comparator::Null, Vec::new())
    }

    #[must_use]
    pub fn not_null(attribute: impl Into<String>) -> Self {
        Self::new(attribute, Comparator::NotNull, Vec::new())
    }
}

///
/// FilterKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FilterKind {
    #[default]
    And,
    Or,
}

///
/// Filter
///
/// Condition group, nestable. An empty filter composes away: queries treat
/// it as "no restriction".
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Filter {
    pub kind: FilterKind,
    pub conditions: Vec<Condition>,
    pub filters: Vec<Filter>,
}

impl Filter {
    #[must_use]
    pub fn and() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn or() -> Self {
        Self {
            kind: FilterKind::Or,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Self) -> Self {
        if !filter.is_empty() {
            self.filters.push(filter);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.filters.is_empty()
    }
}
