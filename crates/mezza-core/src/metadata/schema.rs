use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldKind {
    Bool,
    Choice,
    Collection,
    DateTime,
    Decimal,
    Float,
    Guid,
    Int,
    Memo,
    Money,
    Reference,
    State,
    Status,
    Text,
    Unsupported,
}

///
/// FieldSchema
///
/// One attribute's metadata. `targets` lists the entity types a reference
/// field may point at; empty for everything else.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    pub kind: FieldKind,
    pub targets: Vec<String>,
}

impl FieldSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn reference<I, S>(name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: FieldKind::Reference,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// EntitySchema
///
/// One record type's metadata: which attribute is the primary key, which
/// one carries the display name, and the full field table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntitySchema {
    pub entity: String,
    pub primary_id_attribute: String,
    pub primary_name_attribute: String,
    pub fields: BTreeMap<String, FieldSchema>,
}

impl EntitySchema {
    #[must_use]
    pub fn new(
        entity: impl Into<String>,
        primary_id_attribute: impl Into<String>,
        primary_name_attribute: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            primary_id_attribute: primary_id_attribute.into(),
            primary_name_attribute: primary_name_attribute.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field registration for fixtures and transports.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }
}
