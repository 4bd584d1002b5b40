use crate::query::Filter;
use serde::{Deserialize, Serialize};

///
/// Link
///
/// Inner join from one entity to another, nestable. `criteria` restricts
/// the joined rows; an `alias` prefixes the joined entity's columns in the
/// result (`alias.column`).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Link {
    pub from_entity: String,
    pub from_attribute: String,
    pub to_entity: String,
    pub to_attribute: String,
    pub alias: Option<String>,
    pub criteria: Filter,
    pub links: Vec<Link>,
}

impl Link {
    #[must_use]
    pub fn new(
        from_entity: impl Into<String>,
        from_attribute: impl Into<String>,
        to_entity: impl Into<String>,
        to_attribute: impl Into<String>,
    ) -> Self {
        Self {
            from_entity: from_entity.into(),
            from_attribute: from_attribute.into(),
            to_entity: to_entity.into(),
            to_attribute: to_attribute.into(),
            alias: None,
            criteria: Filter::and(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn criteria(mut self, criteria: Filter) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn link(mut self, link: Self) -> Self {
        self.links.push(link);
        self
    }
}
