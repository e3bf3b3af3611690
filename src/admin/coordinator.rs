//! Flush coordination
//!
//! One call runs: statistics before, discovery, pre-flush notification, FLUSHALL on
//! the first connection that accepts it, statistics after, post-flush notification.
//! Nothing is retried and nothing is raised: every failure ends up in the returned
//! `FlushResult`.

use crate::admin::collector::StatisticsCollector;
use crate::admin::discovery::{ConnectionDiscovery, Connections};
use crate::admin::events::{EventBus, FlushEvent};
use crate::admin::types::{FlushResult, RedisStatistics};
use crate::utils::error::{AdminError, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

pub const NO_CONNECTIONS: &str = "no connections available";
pub const FLUSH_FAILED: &str = "failed to execute flush on any connection";

/// Runs a single FLUSHALL and measures its effect
pub struct FlushCoordinator {
    discovery: Arc<ConnectionDiscovery>,
    collector: StatisticsCollector,
    events: EventBus,
}

impl FlushCoordinator {
    pub fn new(discovery: Arc<ConnectionDiscovery>, events: EventBus) -> Self {
        Self {
            collector: StatisticsCollector::new(Arc::clone(&discovery)),
            discovery,
            events,
        }
    }

    pub async fn flush_all(&self) -> FlushResult {
        let started = Instant::now();

        let before = self.collector.collect().await;
        let memory_before = before.as_ref().map_or(0.0, |s| s.used_memory_mb);
        let estimated_keys = before.as_ref().map_or(0, RedisStatistics::total_keys);

        let connections = self.discovery.list_connections();
        if connections.is_empty() {
            warn!("Redis flush skipped: {}", NO_CONNECTIONS);
            return FlushResult::failed(memory_before, 0, NO_CONNECTIONS);
        }

        let measured = Measured {
            before: before.as_ref(),
            memory_before,
            estimated_keys,
            started,
        };

        match self.flush_connections(&connections, measured).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Redis flush failed");
                FlushResult::failed(memory_before, elapsed_ms(started), e.user_message())
            }
        }
    }

    async fn flush_connections(
        &self,
        connections: &Connections,
        measured: Measured<'_>,
    ) -> Result<FlushResult> {
        self.events.emit(&FlushEvent::BeforeFlush {
            statistics: measured.before,
            connections: connections.iter().map(|(id, _)| id.as_str()).collect(),
        });

        let target = flush_first_accepting(connections).await?;

        let after = self.collector.collect().await;
        // Unknown memory after the flush is reported as unchanged
        let memory_after = after
            .as_ref()
            .map_or(measured.memory_before, |s| s.used_memory_mb);

        let result = FlushResult::succeeded(
            measured.memory_before,
            memory_after,
            elapsed_ms(measured.started),
            measured.estimated_keys,
            target,
        );

        info!(
            targets = ?result.targets_flushed,
            memory_freed_mb = result.memory_freed_mb(),
            keys_deleted = result.keys_deleted,
            execution_time_ms = result.execution_time_ms,
            "Redis flush completed"
        );

        self.events.emit(&FlushEvent::AfterFlush {
            result: &result,
            before: measured.before,
            after: after.as_ref(),
        });

        Ok(result)
    }
}

/// Figures captured before the flush command
struct Measured<'a> {
    before: Option<&'a RedisStatistics>,
    memory_before: f64,
    estimated_keys: u64,
    started: Instant,
}

async fn flush_first_accepting(connections: &Connections) -> Result<String> {
    let mut last_error = None;

    for (id, client) in connections {
        match client.flush_all().await {
            Ok(true) => {
                info!(backend = %id, "FLUSHALL accepted");
                return Ok(id.clone());
            }
            Ok(false) => warn!(backend = %id, "FLUSHALL not accepted"),
            Err(e) => {
                warn!(backend = %id, error = %e, "FLUSHALL failed");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => AdminError::command(format!("{}: {}", FLUSH_FAILED, e.user_message())),
        None => AdminError::command(FLUSH_FAILED),
    })
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
