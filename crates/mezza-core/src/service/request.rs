use crate::{
    metadata::{EntitySchema, FieldSchema},
    types::RecordRef,
};
use serde::{Deserialize, Serialize};

///
/// RelationshipRole
///
/// Which side of a relationship a set of records plays. Only needed when
/// both sides are the same record type; the server cannot tell the sides
/// of a self-join apart otherwise.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RelationshipRole {
    Referencing,
    Referenced,
}

///
/// RelationshipName
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RelationshipName {
    pub name: String,
    pub role: Option<RelationshipRole>,
}

impl RelationshipName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    #[must_use]
    pub fn with_role(name: impl Into<String>, role: RelationshipRole) -> Self {
        Self {
            name: name.into(),
            role: Some(role),
        }
    }
}

///
/// ServiceRequest
///
/// Named operations beyond plain CRUD, executed through
/// [`DataService::execute`](crate::service::DataService::execute).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ServiceRequest {
    Associate {
        target: RecordRef,
        relationship: RelationshipName,
        related: Vec<RecordRef>,
    },
    Disassociate {
        target: RecordRef,
        relationship: RelationshipName,
        related: Vec<RecordRef>,
    },
    SetState {
        target: RecordRef,
        state: i32,
        status: i32,
    },
    EntitySchema {
        entity: String,
    },
    FieldSchema {
        entity: String,
        field: String,
    },
    Version,
}

///
/// ServiceResponse
///
/// The shape is the request's contract; a mismatch surfaces as
/// [`Error::UnexpectedResponse`](crate::error::Error::UnexpectedResponse).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ServiceResponse {
    Unit,
    EntitySchema(EntitySchema),
    FieldSchema(FieldSchema),
    Version(String),
}
