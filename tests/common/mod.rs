//! Common test utilities for redis-admin
//!
//! `FakeRedis` keeps a tiny model of a server (memory, keyspace) and answers `INFO` in
//! the Redis text format, so the full parse path is exercised.

use async_trait::async_trait;
use parking_lot::Mutex;
use redis_admin::storage::{
    BackendPool, CacheBackend, InfoReply, LegacyRedisBackend, OpaqueBackend, RedisBackend,
    SynchronizedBackend,
};
use redis_admin::{AdminError, Result, StoreClient};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Memory a flushed server still uses
pub const BASELINE_MEMORY: u64 = 13_107_200; // 12.5 MB

struct ServerState {
    used_memory: u64,
    max_memory: u64,
    keyspace: BTreeMap<u32, (u64, u64)>,
}

/// In-memory stand-in for a Redis server
pub struct FakeRedis {
    state: Mutex<ServerState>,
    down: AtomicBool,
    read_only: AtomicBool,
    flush_calls: AtomicUsize,
}

impl FakeRedis {
    pub fn new(used_memory: u64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ServerState {
                used_memory,
                max_memory: 0,
                keyspace: BTreeMap::new(),
            }),
            down: AtomicBool::new(false),
            read_only: AtomicBool::new(false),
            flush_calls: AtomicUsize::new(0),
        })
    }

    pub fn with_database(self: Arc<Self>, db: u32, keys: u64, expires: u64) -> Arc<Self> {
        self.state.lock().keyspace.insert(db, (keys, expires));
        self
    }

    pub fn with_max_memory(self: Arc<Self>, bytes: u64) -> Arc<Self> {
        self.state.lock().max_memory = bytes;
        self
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Replica mode: FLUSHALL answers with a READONLY error
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn flush_calls(&self) -> usize {
        self.flush_calls.load(Ordering::SeqCst)
    }

    pub fn total_keys(&self) -> u64 {
        self.state.lock().keyspace.values().map(|(keys, _)| keys).sum()
    }

    fn render_info(&self) -> String {
        let state = self.state.lock();
        let mut info = String::from("# Server\r\nredis_version:7.2.4\r\nuptime_in_seconds:3660\r\n\r\n");
        info.push_str("# Clients\r\nconnected_clients:3\r\n\r\n");
        info.push_str(&format!(
            "# Memory\r\nused_memory:{}\r\nused_memory_peak:{}\r\nmaxmemory:{}\r\n\r\n# Keyspace\r\n",
            state.used_memory, state.used_memory, state.max_memory
        ));
        for (db, (keys, expires)) in &state.keyspace {
            info.push_str(&format!("db{}:keys={},expires={},avg_ttl=0\r\n", db, keys, expires));
        }
        info
    }

    fn check_up(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AdminError::unavailable("Connection refused (os error 111)"));
        }
        Ok(())
    }
}

#[async_trait]
impl StoreClient for FakeRedis {
    async fn info(&self) -> Result<InfoReply> {
        self.check_up()?;
        Ok(InfoReply::from_text(&self.render_info()))
    }

    async fn flush_all(&self) -> Result<bool> {
        self.check_up()?;
        self.flush_calls.fetch_add(1, Ordering::SeqCst);
        if self.read_only.load(Ordering::SeqCst) {
            return Err(AdminError::command(
                "READONLY You can't write against a read only replica.",
            ));
        }
        let mut state = self.state.lock();
        state.keyspace.clear();
        state.used_memory = BASELINE_MEMORY;
        Ok(true)
    }
}

/// Pool shaped like a typical deployment: a file cache, a synchronized config cache
/// on a legacy Redis backend, and a plain Redis page cache.
pub fn deployment_pool(config_store: Arc<FakeRedis>, page_store: Arc<FakeRedis>) -> BackendPool {
    let remote: Arc<dyn CacheBackend> =
        Arc::new(LegacyRedisBackend::new(config_store, "redis://cache:6379/0"));
    BackendPool::new()
        .with_backend("fs", Arc::new(OpaqueBackend::new("file")))
        .with_backend(
            "config",
            Arc::new(SynchronizedBackend::new(Arc::new(OpaqueBackend::new("file")), remote)),
        )
        .with_backend("page_cache", Arc::new(RedisBackend::new(page_store)))
}
