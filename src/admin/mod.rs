//! Redis statistics and flush administration
//!
//! ## Module Structure
//!
//! - `discovery` - Finds Redis store clients in the backend pool
//! - `collector` - Parses `INFO` into `RedisStatistics`
//! - `coordinator` - Runs and measures a FLUSHALL
//! - `events` - Flush notifications
//! - `report` - Rendered views for the CLI and HTTP layers
//! - `types` - Snapshot types

pub mod collector;
pub mod coordinator;
pub mod discovery;
pub mod events;
pub mod report;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use collector::StatisticsCollector;
pub use coordinator::FlushCoordinator;
pub use discovery::{AdapterRegistry, ConnectionDiscovery};
pub use events::{EventBus, FlushEvent, FlushObserver, TracingObserver};
pub use report::{FlushReport, StatisticsReport};
pub use types::{FlushResult, KeyspaceInfo, RedisStatistics};

use crate::storage::BackendPool;
use std::sync::Arc;

/// Entry point for callers: statistics and flush over a backend pool.
///
/// Each call builds its own `ConnectionDiscovery`, so resolutions are never shared
/// between requests.
#[derive(Clone)]
pub struct RedisAdmin {
    pool: Arc<BackendPool>,
    registry: Arc<AdapterRegistry>,
    events: EventBus,
}

impl RedisAdmin {
    /// Admin over `pool` with the default adapters and a logging observer
    pub fn new(pool: BackendPool) -> Self {
        let mut events = EventBus::default();
        events.subscribe(Arc::new(TracingObserver));
        Self {
            pool: Arc::new(pool),
            registry: Arc::new(AdapterRegistry::default()),
            events,
        }
    }

    pub fn with_registry(mut self, registry: AdapterRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn FlushObserver>) -> Self {
        self.events.subscribe(observer);
        self
    }

    pub fn pool(&self) -> &BackendPool {
        &self.pool
    }

    fn discovery(&self) -> Arc<ConnectionDiscovery> {
        Arc::new(ConnectionDiscovery::new(
            Arc::clone(&self.pool),
            Arc::clone(&self.registry),
        ))
    }

    /// Whether any backend resolves to a Redis connection
    pub fn is_available(&self) -> bool {
        self.discovery().is_available()
    }

    /// Current statistics; `None` when Redis is unavailable
    pub async fn get_statistics(&self) -> Option<RedisStatistics> {
        StatisticsCollector::new(self.discovery()).collect().await
    }

    /// Flush every database and report the effect
    pub async fn flush_all(&self) -> FlushResult {
        FlushCoordinator::new(self.discovery(), self.events.clone())
            .flush_all()
            .await
    }
}
