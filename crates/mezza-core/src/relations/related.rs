use crate::{
    DEFAULT_PAGE_SIZE,
    error::Error,
    metadata::SchemaCache,
    query::{Condition, FieldSet, Filter, Link, OrderBy, Query},
    relations::{ActiveStates, Relationship},
    service::{DataService, retrieve_all_with},
    types::{Record, RecordRef, RecordSet, Value},
};

///
/// RelatedQuery
///
/// Query for the records related to one parent, across either kind of
/// [`Relationship`]. `compose` is pure given the schema cache; `execute`
/// runs the composed query fully paged.
///

#[derive(Clone, Debug)]
pub struct RelatedQuery {
    parent: RecordRef,
    relationship: Relationship,
    fields: FieldSet,
    filter: Option<Filter>,
    orders: Vec<OrderBy>,
    only_active: bool,
    no_lock: bool,
}

impl RelatedQuery {
    #[must_use]
    pub fn new(parent: RecordRef, relationship: Relationship) -> Self {
        Self {
            parent,
            relationship,
            fields: FieldSet::All,
            filter: None,
            orders: Vec::new(),
            only_active: false,
            no_lock: false,
        }
    }

    #[must_use]
    pub fn fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    /// Extra restriction, attached as a nested sub-filter alongside the
    /// relationship conditions.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.orders.push(order);
        self
    }

    /// Restrict to records the active-state table counts as active.
    #[must_use]
    pub const fn only_active(mut self, only_active: bool) -> Self {
        self.only_active = only_active;
        self
    }

    #[must_use]
    pub const fn no_lock(mut self, no_lock: bool) -> Self {
        self.no_lock = no_lock;
        self
    }

    /// compose
    /// Builds the retrieve-multiple query. Direct relationships need no
    /// schema; intersect relationships look up the primary id attribute of
    /// each side through the cache (one lookup per side).
    ///
    /// Self-referential intersects join through the `one`/`two` suffixed
    /// intersect columns; that is the only thing telling the server which
    /// side of the self-join the parent is on.
    pub fn compose(
        &self,
        service: &dyn DataService,
        cache: &SchemaCache,
        active: &ActiveStates,
    ) -> Result<Query, Error> {
        let mut query = match &self.relationship {
            Relationship::Direct { child, foreign_key } => {
                let mut criteria = Filter::and()
                    .condition(Condition::equal(foreign_key, self.parent.id));
                if self.only_active
                    && let Some(condition) = active.condition_for(child)
                {
                    criteria = criteria.condition(condition);
                }
                Query::new(child).criteria(criteria)
            }

            Relationship::Intersect { other, via } => {
                let other_pk = cache.primary_id_attribute(service, other)?;

                let link = if *other == self.parent.entity {
                    // Self-referential: one link through the suffixed
                    // intersect columns, parent pinned on the `one` side.
                    Link::new(other, &other_pk, via, format!("{other_pk}two")).criteria(
                        Filter::and().condition(Condition::equal(
                            format!("{other_pk}one"),
                            self.parent.id,
                        )),
                    )
                } else {
                    let parent_pk =
                        cache.primary_id_attribute(service, &self.parent.entity)?;
                    Link::new(other, &other_pk, via, &other_pk).link(
                        Link::new(via, &parent_pk, &self.parent.entity, &parent_pk).criteria(
                            Filter::and()
                                .condition(Condition::equal(&parent_pk, self.parent.id)),
                        ),
                    )
                };

                let mut criteria = Filter::and();
                if self.only_active
                    && let Some(condition) = active.condition_for(other)
                {
                    criteria = criteria.condition(condition);
                }
                Query::new(other).criteria(criteria).link(link)
            }
        };

        if let Some(filter) = &self.filter {
            query.criteria = query.criteria.filter(filter.clone());
        }
        query.fields = self.fields.clone();
        query.orders.clone_from(&self.orders);
        query.no_lock = self.no_lock;

        Ok(query)
    }

    /// Composes and runs the query to completion.
    pub fn execute(
        &self,
        service: &dyn DataService,
        cache: &SchemaCache,
        active: &ActiveStates,
    ) -> Result<RecordSet, Error> {
        self.execute_with(service, cache, active, DEFAULT_PAGE_SIZE)
    }

    pub fn execute_with(
        &self,
        service: &dyn DataService,
        cache: &SchemaCache,
        active: &ActiveStates,
        page_size: u32,
    ) -> Result<RecordSet, Error> {
        let query = self.compose(service, cache, active)?;
        retrieve_all_with(service, query, page_size)
    }
}

/// related_record
/// Follows a reference attribute of `record` to the record it points at.
/// `Ok(None)` when the attribute is absent, null, or not a reference.
pub fn related_record(
    service: &dyn DataService,
    record: &Record,
    reference_attribute: &str,
    fields: &FieldSet,
) -> Result<Option<Record>, Error> {
    match record.get(reference_attribute) {
        Some(Value::Reference(reference)) => {
            let related = service.retrieve(&reference.entity, reference.id, fields)?;
            Ok(Some(related))
        }
        _ => Ok(None),
    }
}

///
/// TESTS
///
