use crate::query::{FieldSet, Filter, Link, OrderBy};
use serde::{Deserialize, Serialize};

///
/// PageInfo
///
/// One page's worth of retrieval: 1-based page number, page size, and the
/// opaque continuation cookie the previous page returned. The cookie is
/// never inspected or synthesized on this side.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageInfo {
    pub number: u32,
    pub size: u32,
    pub cookie: Option<String>,
}

impl PageInfo {
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self {
            number: 1,
            size,
            cookie: None,
        }
    }
}

///
/// Query
///
/// Transport-neutral retrieve-multiple intent. Builders consume and
/// return; nothing validates against schema here — the remote service is
/// the authority on attribute names.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Query {
    pub entity: String,
    pub fields: FieldSet,
    pub criteria: Filter,
    pub orders: Vec<OrderBy>,
    pub links: Vec<Link>,
    /// Read uncommitted: the server skips lock acquisition for this query.
    pub no_lock: bool,
    pub page: Option<PageInfo>,
}

impl Query {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: FieldSet::All,
            criteria: Filter::and(),
            orders: Vec::new(),
            links: Vec::new(),
            no_lock: false,
            page: None,
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn criteria(mut self, criteria: Filter) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    #[must_use]
    pub const fn no_lock(mut self, no_lock: bool) -> Self {
        self.no_lock = no_lock;
        self
    }

    #[must_use]
    pub fn page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }
}
