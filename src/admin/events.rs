//! Flush notifications
//!
//! Observers are called synchronously, in registration order. An observer error is
//! logged and never reaches the flush.

use crate::admin::types::{FlushResult, RedisStatistics};
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Event name emitted before the flush command
pub const EVENT_FLUSH_BEFORE: &str = "redis_flush_before";
/// Event name emitted after a successful flush
pub const EVENT_FLUSH_AFTER: &str = "redis_flush_after";

/// Flush lifecycle event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum FlushEvent<'a> {
    #[serde(rename = "redis_flush_before")]
    BeforeFlush {
        statistics: Option<&'a RedisStatistics>,
        connections: Vec<&'a str>,
    },
    #[serde(rename = "redis_flush_after")]
    AfterFlush {
        result: &'a FlushResult,
        before: Option<&'a RedisStatistics>,
        after: Option<&'a RedisStatistics>,
    },
}

impl FlushEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FlushEvent::BeforeFlush { .. } => EVENT_FLUSH_BEFORE,
            FlushEvent::AfterFlush { .. } => EVENT_FLUSH_AFTER,
        }
    }
}

/// Receiver of flush events
pub trait FlushObserver: Send + Sync {
    fn notify(&self, event: &FlushEvent<'_>) -> Result<()>;
}

/// Ordered list of observers
#[derive(Clone, Default)]
pub struct EventBus {
    observers: Vec<Arc<dyn FlushObserver>>,
}

impl EventBus {
    pub fn new(observers: Vec<Arc<dyn FlushObserver>>) -> Self {
        Self { observers }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn FlushObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer
    pub fn emit(&self, event: &FlushEvent<'_>) {
        for observer in &self.observers {
            if let Err(e) = observer.notify(event) {
                warn!(event = event.name(), error = %e, "Flush observer failed");
            }
        }
    }
}

/// Logs flush events
#[derive(Debug, Default)]
pub struct TracingObserver;

impl FlushObserver for TracingObserver {
    fn notify(&self, event: &FlushEvent<'_>) -> Result<()> {
        match event {
            FlushEvent::BeforeFlush {
                statistics,
                connections,
            } => info!(
                event = event.name(),
                connections = ?connections,
                keys = statistics.map(|s| s.total_keys()).unwrap_or(0),
                used_memory_mb = statistics.map(|s| s.used_memory_mb).unwrap_or(0.0),
                "Flushing Redis"
            ),
            FlushEvent::AfterFlush { result, .. } => info!(
                event = event.name(),
                targets = ?result.targets_flushed,
                memory_freed_mb = result.memory_freed_mb(),
                execution_time_ms = result.execution_time_ms,
                "Redis flushed"
            ),
        }
        Ok(())
    }
}
