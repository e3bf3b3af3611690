//! Test doubles for store clients and backends

use crate::storage::{BackendHandle, BackendKind, CacheBackend, InfoReply, StoreClient};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const INFO_BEFORE: &str = "# Server\r\nredis_version:7.2.4\r\nuptime_in_seconds:90000\r\n# Clients\r\nconnected_clients:4\r\n# Memory\r\nused_memory:524288000\r\nused_memory_peak:629145600\r\nmaxmemory:1073741824\r\n# Keyspace\r\ndb0:keys=1234,expires=523,avg_ttl=3600\r\ndb2:keys=766,expires=0,avg_ttl=0\r\n";

pub const INFO_AFTER: &str = "# Server\r\nredis_version:7.2.4\r\nuptime_in_seconds:90005\r\n# Clients\r\nconnected_clients:4\r\n# Memory\r\nused_memory:13107200\r\nused_memory_peak:629145600\r\nmaxmemory:1073741824\r\n";

enum FlushBehavior {
    Accept,
    Reject,
    Fail(String),
}

/// Store client answering canned INFO replies
pub struct StubStore {
    before: String,
    after: String,
    reachable: bool,
    flush: FlushBehavior,
    flushed: AtomicBool,
    flush_calls: AtomicUsize,
}

impl StubStore {
    pub fn new(info: &str) -> Self {
        Self {
            before: info.to_string(),
            after: info.to_string(),
            reachable: true,
            flush: FlushBehavior::Accept,
            flushed: AtomicBool::new(false),
            flush_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    /// INFO reply served once a flush has been accepted
    pub fn with_after(mut self, info: &str) -> Self {
        self.after = info.to_string();
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.flush = FlushBehavior::Reject;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.flush = FlushBehavior::Fail(message.to_string());
        self
    }

    pub fn flush_calls(&self) -> usize {
        self.flush_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreClient for StubStore {
    async fn info(&self) -> Result<InfoReply> {
        if !self.reachable {
            return Err(AdminError::unavailable("Connection refused (os error 111)"));
        }
        let text = if self.flushed.load(Ordering::SeqCst) {
            &self.after
        } else {
            &self.before
        };
        Ok(InfoReply::from_text(text))
    }

    async fn flush_all(&self) -> Result<bool> {
        self.flush_calls.fetch_add(1, Ordering::SeqCst);
        match &self.flush {
            FlushBehavior::Accept => {
                self.flushed.store(true, Ordering::SeqCst);
                Ok(true)
            }
            FlushBehavior::Reject => Ok(false),
            FlushBehavior::Fail(message) => Err(AdminError::command(message.clone())),
        }
    }
}

/// Backend that exposes named handles and counts how often it is probed
pub struct ProbeCountingBackend {
    type_name: String,
    handles: HashMap<String, BackendHandle>,
    failing: bool,
    probes: AtomicUsize,
}

impl ProbeCountingBackend {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            handles: HashMap::new(),
            failing: false,
            probes: AtomicUsize::new(0),
        }
    }

    pub fn with_client(mut self, name: &str, client: Arc<dyn StoreClient>) -> Self {
        self.handles
            .insert(name.to_string(), BackendHandle::Store(client));
        self
    }

    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.handles
            .insert(name.to_string(), BackendHandle::Value(value.to_string()));
        self
    }

    /// Every probe returns an error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl CacheBackend for ProbeCountingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Other
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn handle(&self, name: &str) -> Result<Option<BackendHandle>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(AdminError::introspection(format!(
                "cannot read handle {} on {}",
                name, self.type_name
            )));
        }
        Ok(self.handles.get(name).cloned())
    }
}
