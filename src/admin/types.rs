//! Statistics and flush result types
//!
//! All values are snapshots built once per query or flush and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::format::{format_ttl, format_uptime};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Convert bytes to megabytes rounded to two decimals
pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Key counts for one logical database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyspaceInfo {
    pub database: u32,
    pub keys: u64,
    pub expires: u64,
    /// Average TTL as reported by the server; 0 means no TTL data
    pub avg_ttl_seconds: u64,
}

impl KeyspaceInfo {
    /// Parse a `keys=N,expires=N,avg_ttl=N` keyspace line.
    ///
    /// Unknown keys and entries without `=` are skipped; missing or unparseable
    /// counts are 0. `expires` is capped at `keys`.
    pub fn parse(database: u32, value: &str) -> Self {
        let mut keys = 0;
        let mut expires = 0;
        let mut avg_ttl = 0;

        for (key, raw) in value.split(',').filter_map(|entry| entry.split_once('=')) {
            let parsed = raw.trim().parse::<u64>().unwrap_or(0);
            match key.trim() {
                "keys" => keys = parsed,
                "expires" => expires = parsed,
                "avg_ttl" => avg_ttl = parsed,
                _ => {}
            }
        }

        Self {
            database,
            keys,
            expires: expires.min(keys),
            avg_ttl_seconds: avg_ttl,
        }
    }

    /// Share of keys carrying an expiry, 0 for an empty database
    pub fn expiry_percentage(&self) -> f64 {
        if self.keys == 0 {
            return 0.0;
        }
        round2(self.expires as f64 / self.keys as f64 * 100.0)
    }

    pub fn formatted_ttl(&self) -> String {
        format_ttl(self.avg_ttl_seconds)
    }
}

/// Server statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisStatistics {
    pub used_memory_mb: f64,
    pub used_memory_peak_mb: f64,
    /// `None` when the server has no memory limit
    pub max_memory_mb: Option<f64>,
    pub connected_clients: u64,
    pub uptime_seconds: u64,
    pub keyspace: BTreeMap<u32, KeyspaceInfo>,
    pub version: String,
    pub is_connected: bool,
    pub collected_at: DateTime<Utc>,
}

impl RedisStatistics {
    /// Used memory against the configured limit; `None` when unlimited
    pub fn memory_usage_percentage(&self) -> Option<f64> {
        self.max_memory_mb
            .filter(|max| *max > 0.0)
            .map(|max| round2(self.used_memory_mb / max * 100.0))
    }

    pub fn total_keys(&self) -> u64 {
        self.keyspace.values().map(|db| db.keys).sum()
    }

    pub fn total_expires(&self) -> u64 {
        self.keyspace.values().map(|db| db.expires).sum()
    }

    pub fn formatted_uptime(&self) -> String {
        format_uptime(self.uptime_seconds)
    }
}

/// Outcome of one flush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlushResult {
    pub success: bool,
    pub memory_before_mb: f64,
    pub memory_after_mb: f64,
    pub execution_time_ms: u64,
    /// Keys seen before the flush. FLUSHALL leaves nothing to count afterwards, so
    /// this is an estimate.
    pub keys_deleted: u64,
    pub targets_flushed: Vec<String>,
    pub executed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FlushResult {
    pub fn succeeded(
        memory_before_mb: f64,
        memory_after_mb: f64,
        execution_time_ms: u64,
        keys_deleted: u64,
        target: String,
    ) -> Self {
        Self {
            success: true,
            memory_before_mb,
            memory_after_mb,
            execution_time_ms,
            keys_deleted,
            targets_flushed: vec![target],
            executed_at: Utc::now(),
            error_message: None,
        }
    }

    /// Failed flush: memory is reported unchanged and no target was flushed
    pub fn failed(
        memory_before_mb: f64,
        execution_time_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            memory_before_mb,
            memory_after_mb: memory_before_mb,
            execution_time_ms,
            keys_deleted: 0,
            targets_flushed: Vec::new(),
            executed_at: Utc::now(),
            error_message: Some(message.into()),
        }
    }

    pub fn memory_freed_mb(&self) -> f64 {
        round2((self.memory_before_mb - self.memory_after_mb).max(0.0))
    }

    pub fn memory_freed_percentage(&self) -> f64 {
        if self.memory_before_mb <= 0.0 {
            return 0.0;
        }
        round2(self.memory_freed_mb() / self.memory_before_mb * 100.0)
    }

    pub fn execution_time_seconds(&self) -> f64 {
        self.execution_time_ms as f64 / 1000.0
    }
}
