use crate::{
    DEFAULT_SCHEMA_TTL_SECS,
    error::Error,
    metadata::{EntitySchema, FieldSchema},
    service::{DataService, ServiceRequest, ServiceResponse},
};
use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

///
/// TimeSource
///
/// Clock seam for the cache. Production uses the monotonic clock; tests
/// inject a manual one to step through expiry windows.
///

pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

struct MonotonicTime;

impl TimeSource for MonotonicTime {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

///
/// SchemaCache
///
/// Process-wide schema lookup cache with per-entry sliding expiry. Handles
/// are cheap clones of one shared store; every operation in the process
/// shares the same entries.
///
/// The store lock is never held across a remote fetch, so two operations
/// missing the same key may both fetch. Both results are equally fresh;
/// the second write wins.
///

#[derive(Clone)]
pub struct SchemaCache {
    inner: Arc<Inner>,
}

struct Inner {
    ttl: Duration,
    time: Box<dyn TimeSource>,
    entities: Mutex<HashMap<String, Entry<Arc<EntitySchema>>>>,
    fields: Mutex<HashMap<(String, String), Entry<Arc<FieldSchema>>>>,
}

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_SCHEMA_TTL_SECS))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_time_source(ttl, Box::new(MonotonicTime))
    }

    #[must_use]
    pub fn with_time_source(ttl: Duration, time: Box<dyn TimeSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                time,
                entities: Mutex::new(HashMap::new()),
                fields: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// entity
    /// Cached-or-fetched schema of one record type. A hit slides the
    /// entry's expiry forward; a miss fetches through the service and
    /// stores the result.
    pub fn entity(
        &self,
        service: &dyn DataService,
        entity: &str,
    ) -> Result<Arc<EntitySchema>, Error> {
        let now = self.inner.time.now();
        let key = entity.to_string();

        if let Some(hit) = touch(&self.inner.entities, &key, now, self.inner.ttl) {
            return Ok(hit);
        }

        let request = ServiceRequest::EntitySchema {
            entity: entity.to_string(),
        };
        match service.execute(&request) {
            Ok(ServiceResponse::EntitySchema(schema)) => {
                let schema = Arc::new(schema);
                store(&self.inner.entities, key, schema.clone(), now, self.inner.ttl);
                Ok(schema)
            }
            Ok(_) => Err(Error::UnexpectedResponse {
                request: "EntitySchema",
            }),
            Err(err) => {
                if err.is_unknown_entity() {
                    self.invalidate(entity);
                }
                Err(err.into())
            }
        }
    }

    /// field
    /// Cached-or-fetched schema of one attribute, keyed by the entity and
    /// field pair. Same contract as [`Self::entity`].
    pub fn field(
        &self,
        service: &dyn DataService,
        entity: &str,
        field: &str,
    ) -> Result<Arc<FieldSchema>, Error> {
        let now = self.inner.time.now();
        let key = (entity.to_string(), field.to_string());

        if let Some(hit) = touch(&self.inner.fields, &key, now, self.inner.ttl) {
            return Ok(hit);
        }

        let request = ServiceRequest::FieldSchema {
            entity: entity.to_string(),
            field: field.to_string(),
        };
        match service.execute(&request) {
            Ok(ServiceResponse::FieldSchema(schema)) => {
                let schema = Arc::new(schema);
                store(&self.inner.fields, key, schema.clone(), now, self.inner.ttl);
                Ok(schema)
            }
            Ok(_) => Err(Error::UnexpectedResponse {
                request: "FieldSchema",
            }),
            Err(err) => {
                if err.is_unknown_entity() {
                    self.invalidate(entity);
                }
                Err(err.into())
            }
        }
    }

    pub fn primary_id_attribute(
        &self,
        service: &dyn DataService,
        entity: &str,
    ) -> Result<String, Error> {
        Ok(self.entity(service, entity)?.primary_id_attribute.clone())
    }

    pub fn primary_name_attribute(
        &self,
        service: &dyn DataService,
        entity: &str,
    ) -> Result<String, Error> {
        Ok(self.entity(service, entity)?.primary_name_attribute.clone())
    }

    /// Drops everything cached for one record type, its field entries
    /// included.
    pub fn invalidate(&self, entity: &str) {
        lock(&self.inner.entities).remove(entity);
        lock(&self.inner.fields).retain(|(e, _), _| e != entity);
    }

    pub fn clear(&self) {
        lock(&self.inner.entities).clear();
        lock(&self.inner.fields).clear();
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn touch<K, T>(map: &Mutex<HashMap<K, Entry<T>>>, key: &K, now: Instant, ttl: Duration) -> Option<T>
where
    K: Eq + Hash,
    T: Clone,
{
    let mut guard = lock(map);
    match guard.get_mut(key) {
        Some(entry) if now < entry.expires_at => {
            entry.expires_at = now + ttl;
            Some(entry.value.clone())
        }
        Some(_) => {
            guard.remove(key);
            None
        }
        None => None,
    }
}

fn store<K, T>(map: &Mutex<HashMap<K, Entry<T>>>, key: K, value: T, now: Instant, ttl: Duration)
where
    K: Eq + Hash,
{
    lock(map).insert(
        key,
        Entry {
            value,
            expires_at: now + ttl,
        },
    );
}

///
/// TESTS
///
