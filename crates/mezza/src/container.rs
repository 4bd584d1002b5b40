use crate::config::ContainerConfig;
use mezza_core::{
    context::{ExecutionContext, RecordViews},
    error::Error,
    metadata::{EntitySchema, FieldSchema},
    query::{FieldSet, PageInfo, Query},
    relations::{self, RelatedQuery, Relationship},
    service::{DataService, ServiceRequest, ServiceResponse, retrieve_all_with},
    trace::{TraceSink, TraceSpan, Tracer},
    types::{Record, RecordId, RecordRef, RecordSet, Value},
};
use std::sync::Arc;

///
/// ExecutionContainer
///
/// One operation's working set: the context views, the remote service,
/// the shared schema cache, and a sectioned tracer. Handlers receive a
/// container, do their work through it, and drop it when the operation
/// ends. Not `Sync`; each operation builds its own.
///

pub struct ExecutionContainer {
    views: RecordViews,
    service: Arc<dyn DataService>,
    tracer: Tracer,
    config: ContainerConfig,
}

impl ExecutionContainer {
    #[must_use]
    pub fn new(
        ctx: Box<dyn ExecutionContext>,
        service: Arc<dyn DataService>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        Self::with_config(ctx, service, sink, ContainerConfig::default())
    }

    #[must_use]
    pub fn with_config(
        ctx: Box<dyn ExecutionContext>,
        service: Arc<dyn DataService>,
        sink: Arc<dyn TraceSink>,
        config: ContainerConfig,
    ) -> Self {
        Self {
            views: RecordViews::new(ctx),
            service,
            tracer: Tracer::new(sink),
            config,
        }
    }

    // ------------------------------------------------------------------
    // Context views
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn views(&self) -> &RecordViews {
        &self.views
    }

    #[must_use]
    pub fn context(&self) -> &dyn ExecutionContext {
        self.views.context()
    }

    #[must_use]
    pub fn target(&self) -> Option<&Record> {
        self.views.target()
    }

    #[must_use]
    pub fn pre(&self) -> Option<&Record> {
        self.views.pre()
    }

    #[must_use]
    pub fn post(&self) -> Option<&Record> {
        self.views.post()
    }

    #[must_use]
    pub fn complete(&self) -> Option<&Record> {
        self.views.complete()
    }

    #[must_use]
    pub fn resolved_record_id(&self) -> RecordId {
        self.views.resolved_id()
    }

    // ------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------

    pub fn schema(&self, entity: &str) -> Result<Arc<EntitySchema>, Error> {
        self.config.schema_cache.entity(self.service.as_ref(), entity)
    }

    pub fn field(&self, entity: &str, field: &str) -> Result<Arc<FieldSchema>, Error> {
        self.config
            .schema_cache
            .field(self.service.as_ref(), entity, field)
    }

    pub fn primary_id_attribute(&self, entity: &str) -> Result<String, Error> {
        self.config
            .schema_cache
            .primary_id_attribute(self.service.as_ref(), entity)
    }

    pub fn primary_name_attribute(&self, entity: &str) -> Result<String, Error> {
        self.config
            .schema_cache
            .primary_name_attribute(self.service.as_ref(), entity)
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    /// Builder for the records related to `parent`; run it with
    /// [`Self::retrieve_related`].
    #[must_use]
    pub fn related(&self, parent: &RecordRef, relationship: Relationship) -> RelatedQuery {
        RelatedQuery::new(parent.clone(), relationship)
    }

    pub fn retrieve_related(&self, query: &RelatedQuery) -> Result<RecordSet, Error> {
        let _span = self.tracer.span("retrieve related");
        query.execute_with(
            self.service.as_ref(),
            &self.config.schema_cache,
            &self.config.active_states,
            self.config.page_size,
        )
    }

    /// Follows a reference attribute of `record` to the record it points
    /// at; `Ok(None)` when the attribute is absent or null.
    pub fn related_record(
        &self,
        record: &Record,
        reference_attribute: &str,
        fields: &FieldSet,
    ) -> Result<Option<Record>, Error> {
        relations::related_record(self.service.as_ref(), record, reference_attribute, fields)
    }

    pub fn associate(
        &self,
        parent: &RecordRef,
        related: &[RecordRef],
        via: &str,
    ) -> Result<(), Error> {
        let _span = self.tracer.span("associate");
        relations::associate(
            self.service.as_ref(),
            parent,
            related,
            via,
            self.config.batch_size,
        )
    }

    pub fn disassociate(
        &self,
        parent: &RecordRef,
        related: &[RecordRef],
        via: &str,
    ) -> Result<(), Error> {
        let _span = self.tracer.span("disassociate");
        relations::disassociate(
            self.service.as_ref(),
            parent,
            related,
            via,
            self.config.batch_size,
        )
    }

    // ------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------

    pub fn retrieve(
        &self,
        entity: &str,
        id: RecordId,
        fields: &FieldSet,
    ) -> Result<Record, Error> {
        let _span = self.tracer.span("retrieve");
        Ok(self.service.retrieve(entity, id, fields)?)
    }

    /// Runs `query` to completion across pages.
    pub fn retrieve_by_query(&self, query: Query) -> Result<RecordSet, Error> {
        let _span = self.tracer.span("retrieve by query");
        retrieve_all_with(self.service.as_ref(), query, self.config.page_size)
    }

    /// First match only; asks the server for a single-record page.
    pub fn retrieve_first(&self, mut query: Query) -> Result<Option<Record>, Error> {
        let _span = self.tracer.span("retrieve first");
        query.page = Some(PageInfo::first(1));
        let mut result = self.service.retrieve_multiple(&query)?;
        if result.records.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.records.remove(0)))
        }
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    pub fn create(&self, record: &Record) -> Result<RecordId, Error> {
        let _span = self.tracer.span("create");
        Ok(self.service.create(record)?)
    }

    pub fn update(&self, record: &Record) -> Result<(), Error> {
        let _span = self.tracer.span("update");
        Ok(self.service.update(record)?)
    }

    /// Deletes by the record's own identity; a record without an id is a
    /// no-op, not an error.
    pub fn delete(&self, record: &Record) -> Result<(), Error> {
        if record.id.is_unset() {
            return Ok(());
        }
        let _span = self.tracer.span("delete");
        Ok(self.service.delete(&record.entity, record.id)?)
    }

    /// Create-or-update on the id: an unset id creates and writes the new
    /// id back, anything else updates.
    pub fn save(&self, record: &mut Record) -> Result<(), Error> {
        if record.id.is_unset() {
            record.id = self.create(record)?;
            Ok(())
        } else {
            self.update(record)
        }
    }

    /// reload
    /// Replaces `record` with a fresh retrieval of the requested fields.
    /// Aliased join columns (dotted names) only exist inside a join result
    /// and are rejected before any remote call.
    pub fn reload(&self, record: &mut Record, fields: &FieldSet) -> Result<(), Error> {
        if let Some(aliased) = fields.aliased_column() {
            return Err(Error::AliasedField {
                attribute: aliased.to_string(),
            });
        }
        if record.id.is_unset() {
            return Err(Error::UnsetRecordId {
                entity: record.entity.clone(),
            });
        }

        *record = self.retrieve(&record.entity, record.id, fields)?;
        Ok(())
    }

    /// ensure
    /// Guarantees the requested columns are present on `record`, fetching
    /// only the missing ones and merging without clobbering what is
    /// already there. `FieldSet::All` always fetches.
    pub fn ensure(&self, record: &mut Record, fields: &FieldSet) -> Result<(), Error> {
        if let Some(aliased) = fields.aliased_column() {
            return Err(Error::AliasedField {
                attribute: aliased.to_string(),
            });
        }

        let wanted = match fields {
            FieldSet::None => return Ok(()),
            FieldSet::All => FieldSet::All,
            FieldSet::Columns(names) => {
                let missing: Vec<String> = names
                    .iter()
                    .filter(|name| !record.contains(name))
                    .cloned()
                    .collect();
                if missing.is_empty() {
                    return Ok(());
                }
                FieldSet::Columns(missing)
            }
        };

        if record.id.is_unset() {
            return Err(Error::UnsetRecordId {
                entity: record.entity.clone(),
            });
        }

        let fetched = self.retrieve(&record.entity, record.id, &wanted)?;
        *record = record.merge(&fetched);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Ownership transfer: writes the `ownerid` attribute through a
    /// minimal update.
    pub fn assign(&self, record: &Record, owner: &RecordRef) -> Result<(), Error> {
        if record.id.is_unset() {
            return Err(Error::UnsetRecordId {
                entity: record.entity.clone(),
            });
        }

        let _span = self.tracer.span("assign");
        let mut patch = Record::with_id(record.entity.clone(), record.id);
        patch.set("ownerid", owner.clone());
        Ok(self.service.update(&patch)?)
    }

    pub fn set_state(&self, record: &Record, state: i32, status: i32) -> Result<(), Error> {
        if record.id.is_unset() {
            return Err(Error::UnsetRecordId {
                entity: record.entity.clone(),
            });
        }

        let _span = self.tracer.span("set state");
        let request = ServiceRequest::SetState {
            target: record.to_ref(),
            state,
            status,
        };
        match self.service.execute(&request)? {
            ServiceResponse::Unit => Ok(()),
            _ => Err(Error::UnexpectedResponse {
                request: "SetState",
            }),
        }
    }

    pub fn is_active(&self, record: &Record) -> Result<bool, Error> {
        self.config.active_states.is_active(record)
    }

    /// `entity (name)` when the record carries its primary name attribute,
    /// `entity (id)` otherwise.
    pub fn display_string(&self, record: &Record) -> Result<String, Error> {
        let name_attribute = self.primary_name_attribute(&record.entity)?;
        match record.get(&name_attribute) {
            Some(Value::Text(name)) => Ok(format!("{} ({name})", record.entity)),
            _ => Ok(record.to_string()),
        }
    }

    pub fn platform_version(&self) -> Result<String, Error> {
        let _span = self.tracer.span("version");
        match self.service.execute(&ServiceRequest::Version)? {
            ServiceResponse::Version(version) => Ok(version),
            _ => Err(Error::UnexpectedResponse { request: "Version" }),
        }
    }

    // ------------------------------------------------------------------
    // Tracing
    // ------------------------------------------------------------------

    pub fn trace(&self, text: &str) {
        self.tracer.line(text);
    }

    #[must_use]
    pub fn span(&self, label: &str) -> TraceSpan<'_> {
        self.tracer.span(label)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn service(&self) -> &dyn DataService {
        self.service.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &ContainerConfig {
        &self.config
    }
}
