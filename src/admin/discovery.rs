//! Connection discovery
//!
//! Finds the Redis-backed entries of a backend pool and resolves each to a store
//! client. Resolution goes through three steps, first hit wins:
//!
//! 1. the backend's own `store_client` capability,
//! 2. an adapter registered for the backend's type name,
//! 3. the conventional handle names, in order.
//!
//! Every resolution, including "not found", is memoized per backend id for the
//! lifetime of the `ConnectionDiscovery` instance.

use crate::storage::{BackendHandle, BackendKind, BackendPool, CacheBackend, StoreClient};
use crate::utils::error::{AdminError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle names probed on recognized backends that expose no capability or adapter
pub const CONVENTIONAL_HANDLES: &[&str] = &["_redis", "redis", "_client", "client"];

/// Store clients by backend id, in pool order
pub type Connections = Vec<(String, Arc<dyn StoreClient>)>;

/// Extraction function for one backend variant
pub type AdapterFn = fn(&dyn CacheBackend) -> Result<Option<Arc<dyn StoreClient>>>;

/// Explicit registry of client extractors keyed by backend type name
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<String, AdapterFn>,
}

impl AdapterRegistry {
    /// Registry without any adapter
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    pub fn register(&mut self, type_name: impl Into<String>, adapter: AdapterFn) {
        self.adapters.insert(type_name.into(), adapter);
    }

    pub fn get(&self, type_name: &str) -> Option<AdapterFn> {
        self.adapters.get(type_name).copied()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("legacy_redis", legacy_redis_adapter);
        registry
    }
}

fn legacy_redis_adapter(backend: &dyn CacheBackend) -> Result<Option<Arc<dyn StoreClient>>> {
    match backend.handle("_redis")? {
        Some(BackendHandle::Store(client)) => Ok(Some(client)),
        Some(BackendHandle::Value(_)) => Err(AdminError::introspection(
            "_redis handle is not a store client",
        )),
        None => Ok(None),
    }
}

/// Whether a backend is Redis-backed: one of the known kinds, or a type name that
/// mentions redis.
pub fn is_redis_backend(backend: &dyn CacheBackend) -> bool {
    matches!(backend.kind(), BackendKind::Redis | BackendKind::LegacyRedis)
        || backend.type_name().to_lowercase().contains("redis")
}

/// Per-instance memoizing discovery over a backend pool
pub struct ConnectionDiscovery {
    pool: Arc<BackendPool>,
    registry: Arc<AdapterRegistry>,
    resolved: Mutex<HashMap<String, Option<Arc<dyn StoreClient>>>>,
}

impl ConnectionDiscovery {
    pub fn new(pool: Arc<BackendPool>, registry: Arc<AdapterRegistry>) -> Self {
        Self {
            pool,
            registry,
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// All resolvable connections in pool order
    pub fn list_connections(&self) -> Connections {
        self.pool
            .iter()
            .filter_map(|(id, backend)| {
                self.resolve_cached(id, backend.as_ref())
                    .map(|client| (id.to_string(), client))
            })
            .collect()
    }

    /// First connection of `list_connections`
    pub fn primary_connection(&self) -> Option<Arc<dyn StoreClient>> {
        self.list_connections()
            .into_iter()
            .next()
            .map(|(_, client)| client)
    }

    pub fn is_available(&self) -> bool {
        !self.list_connections().is_empty()
    }

    /// Forget every memoized resolution
    pub fn clear_cache(&self) {
        self.resolved.lock().clear();
    }

    fn resolve_cached(&self, id: &str, backend: &dyn CacheBackend) -> Option<Arc<dyn StoreClient>> {
        if let Some(cached) = self.resolved.lock().get(id) {
            return cached.clone();
        }

        let resolved = match self.resolve(backend) {
            Ok(client) => client,
            Err(e) => {
                warn!(backend = %id, error = %e, "Failed to inspect cache backend");
                None
            }
        };

        if resolved.is_some() {
            debug!(backend = %id, "Found Redis connection");
        }
        self.resolved.lock().insert(id.to_string(), resolved.clone());
        resolved
    }

    fn resolve(&self, backend: &dyn CacheBackend) -> Result<Option<Arc<dyn StoreClient>>> {
        let unwrapped;
        let backend = match backend.synchronized_inner() {
            Some(inner) => {
                unwrapped = inner?;
                unwrapped.as_ref()
            }
            None => backend,
        };

        if !is_redis_backend(backend) {
            return Ok(None);
        }

        if let Some(client) = backend.store_client() {
            return Ok(Some(client));
        }

        if let Some(adapter) = self.registry.get(backend.type_name()) {
            return adapter(backend);
        }

        for name in CONVENTIONAL_HANDLES {
            if let Some(BackendHandle::Store(client)) = backend.handle(name)? {
                return Ok(Some(client));
            }
        }

        Ok(None)
    }
}
