//! Statistics collection from the primary Redis connection

use crate::admin::discovery::ConnectionDiscovery;
use crate::admin::types::{KeyspaceInfo, RedisStatistics, bytes_to_mb};
use crate::storage::InfoReply;
use crate::utils::error::{AdminError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds `RedisStatistics` from an `INFO` reply
pub struct StatisticsCollector {
    discovery: Arc<ConnectionDiscovery>,
}

impl StatisticsCollector {
    pub fn new(discovery: Arc<ConnectionDiscovery>) -> Self {
        Self { discovery }
    }

    /// Current statistics, or `None` when no connection is available or the query
    /// fails.
    pub async fn collect(&self) -> Option<RedisStatistics> {
        let Some(client) = self.discovery.primary_connection() else {
            debug!("No Redis connection available for statistics");
            return None;
        };

        let reply = match client.info().await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Failed to query Redis INFO");
                return None;
            }
        };

        match parse_statistics(&reply) {
            Ok(statistics) => Some(statistics),
            Err(e) => {
                warn!(error = %e, "Discarding unusable Redis INFO reply");
                None
            }
        }
    }
}

/// Turn an `INFO` reply into a statistics snapshot
pub fn parse_statistics(reply: &InfoReply) -> Result<RedisStatistics> {
    if reply.is_empty() {
        return Err(AdminError::parse("INFO reply contained no fields"));
    }

    let field = |key: &str| reply.unsigned(key).unwrap_or(0);

    let max_memory = field("maxmemory");

    Ok(RedisStatistics {
        used_memory_mb: bytes_to_mb(field("used_memory")),
        used_memory_peak_mb: bytes_to_mb(field("used_memory_peak")),
        max_memory_mb: (max_memory > 0).then(|| bytes_to_mb(max_memory)),
        connected_clients: field("connected_clients"),
        uptime_seconds: field("uptime_in_seconds"),
        keyspace: parse_keyspace(reply),
        version: reply
            .text("redis_version")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
        is_connected: true,
        collected_at: Utc::now(),
    })
}

/// Collect every `db<N>` field into keyspace entries ordered by database id
pub fn parse_keyspace(reply: &InfoReply) -> BTreeMap<u32, KeyspaceInfo> {
    reply
        .iter()
        .filter_map(|(key, value)| {
            let database = key.strip_prefix("db")?.parse::<u32>().ok()?;
            Some((database, KeyspaceInfo::parse(database, &value.as_text())))
        })
        .collect()
}
