use mezza_core::{DEFAULT_PAGE_SIZE, metadata::SchemaCache, relations::ActiveStates};

///
/// ContainerConfig
///
/// Tuning shared by every container a host builds. The schema cache
/// handle is the part worth sharing process-wide; clone one config per
/// operation and all containers hit the same cache.
///

#[derive(Clone)]
pub struct ContainerConfig {
    pub schema_cache: SchemaCache,
    pub active_states: ActiveStates,
    /// Page size for fully paged retrievals.
    pub page_size: u32,
    /// Association batch cap; `None` submits everything in one request.
    pub batch_size: Option<usize>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            schema_cache: SchemaCache::new(),
            active_states: ActiveStates::default(),
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: None,
        }
    }
}
