//! Cache backends and the backend pool
//!
//! A backend is opaque to the admin service apart from a handful of capability checks:
//! whether it exposes a store client, whether it wraps another backend, and which
//! named internal handles it carries.

use crate::config::{BackendConfig, BackendType};
use crate::storage::client::StoreClient;
use crate::storage::redis::RedisPool;
use crate::utils::error::{AdminError, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Backend variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Redis,
    LegacyRedis,
    Synchronized,
    Other,
}

/// Named internal handle of a backend
#[derive(Clone)]
pub enum BackendHandle {
    /// Handle that is a usable store client
    Store(Arc<dyn StoreClient>),
    /// Any other internal value (options, paths, serializers)
    Value(String),
}

impl fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendHandle::Store(_) => f.write_str("Store(..)"),
            BackendHandle::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A configured storage adapter of the cache layer
pub trait CacheBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Type name used for adapter lookup and the "redis" name heuristic
    fn type_name(&self) -> &str;

    /// Store client owned by this backend, for backends that expose it directly
    fn store_client(&self) -> Option<Arc<dyn StoreClient>> {
        None
    }

    /// Delegate of a synchronization wrapper; `None` for plain backends
    fn synchronized_inner(&self) -> Option<Result<Arc<dyn CacheBackend>>> {
        None
    }

    /// Look up a named internal handle
    fn handle(&self, _name: &str) -> Result<Option<BackendHandle>> {
        Ok(None)
    }
}

/// Redis backend exposing its client through the capability
pub struct RedisBackend {
    client: Arc<dyn StoreClient>,
}

impl RedisBackend {
    pub fn new(client: Arc<dyn StoreClient>) -> Self {
        Self { client }
    }
}

impl CacheBackend for RedisBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }

    fn type_name(&self) -> &str {
        "redis"
    }

    fn store_client(&self) -> Option<Arc<dyn StoreClient>> {
        Some(Arc::clone(&self.client))
    }

    fn handle(&self, name: &str) -> Result<Option<BackendHandle>> {
        Ok((name == "redis").then(|| BackendHandle::Store(Arc::clone(&self.client))))
    }
}

/// Older Redis backend keeping its client in the `_redis` handle
pub struct LegacyRedisBackend {
    client: Arc<dyn StoreClient>,
    options: String,
}

impl LegacyRedisBackend {
    pub fn new(client: Arc<dyn StoreClient>, options: impl Into<String>) -> Self {
        Self {
            client,
            options: options.into(),
        }
    }
}

impl CacheBackend for LegacyRedisBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::LegacyRedis
    }

    fn type_name(&self) -> &str {
        "legacy_redis"
    }

    fn handle(&self, name: &str) -> Result<Option<BackendHandle>> {
        Ok(match name {
            "_redis" => Some(BackendHandle::Store(Arc::clone(&self.client))),
            "_options" => Some(BackendHandle::Value(self.options.clone())),
            _ => None,
        })
    }
}

/// Local backend kept in sync with a remote one; cache reads and writes go to the
/// remote.
pub struct SynchronizedBackend {
    local: Arc<dyn CacheBackend>,
    remote: Arc<dyn CacheBackend>,
}

impl SynchronizedBackend {
    pub fn new(local: Arc<dyn CacheBackend>, remote: Arc<dyn CacheBackend>) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &Arc<dyn CacheBackend> {
        &self.local
    }
}

impl CacheBackend for SynchronizedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Synchronized
    }

    fn type_name(&self) -> &str {
        "remote_synchronized"
    }

    fn synchronized_inner(&self) -> Option<Result<Arc<dyn CacheBackend>>> {
        Some(Ok(Arc::clone(&self.remote)))
    }
}

/// Non-Redis backend (file, memory); carries nothing the admin service can use
pub struct OpaqueBackend {
    type_name: String,
}

impl OpaqueBackend {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl CacheBackend for OpaqueBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Other
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Ordered set of backends keyed by identifier
#[derive(Clone, Default)]
pub struct BackendPool {
    backends: Vec<(String, Arc<dyn CacheBackend>)>,
}

impl BackendPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pool from configuration, preserving configured order
    pub fn from_config(configs: &[BackendConfig]) -> Result<Self> {
        let mut pool = Self::new();
        for config in configs {
            let backend = build_backend(config)?;
            debug!("Registered backend {} ({})", config.id, backend.type_name());
            pool.insert(config.id.clone(), backend);
        }
        Ok(pool)
    }

    /// Add a backend; an existing id keeps its position and gets the new backend
    pub fn insert(&mut self, id: impl Into<String>, backend: Arc<dyn CacheBackend>) {
        let id = id.into();
        match self.backends.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = backend,
            None => self.backends.push((id, backend)),
        }
    }

    pub fn with_backend(mut self, id: impl Into<String>, backend: Arc<dyn CacheBackend>) -> Self {
        self.insert(id, backend);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn CacheBackend>)> {
        self.backends.iter().map(|(id, backend)| (id.as_str(), backend))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.backends.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(id, backend)| (id, backend.type_name())))
            .finish()
    }
}

fn build_backend(config: &BackendConfig) -> Result<Arc<dyn CacheBackend>> {
    let backend: Arc<dyn CacheBackend> = match config.backend_type {
        BackendType::Redis => Arc::new(RedisBackend::new(Arc::new(redis_pool(config)?))),
        BackendType::LegacyRedis => {
            let pool = redis_pool(config)?;
            let options = pool.display_url();
            Arc::new(LegacyRedisBackend::new(Arc::new(pool), options))
        }
        BackendType::Synchronized => {
            let remote = config.remote.as_deref().ok_or_else(|| {
                AdminError::config(format!("Backend '{}' requires a remote backend", config.id))
            })?;
            Arc::new(SynchronizedBackend::new(
                Arc::new(OpaqueBackend::new("file")),
                build_backend(remote)?,
            ))
        }
        BackendType::File => Arc::new(OpaqueBackend::new("file")),
        BackendType::Memory => Arc::new(OpaqueBackend::new("memory")),
    };
    Ok(backend)
}

fn redis_pool(config: &BackendConfig) -> Result<RedisPool> {
    let redis = config.redis.as_ref().ok_or_else(|| {
        AdminError::config(format!("Backend '{}' requires a redis section", config.id))
    })?;
    RedisPool::new(redis)
}
