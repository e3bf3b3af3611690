//! Rendered views of statistics and flush results
//!
//! Reports carry the raw snapshot plus derived and formatted fields, ready for JSON
//! output or terminal display.

use crate::admin::types::{FlushResult, KeyspaceInfo, RedisStatistics};
use crate::utils::format::{UsageLevel, format_megabytes};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct KeyspaceReport {
    #[serde(flatten)]
    pub info: KeyspaceInfo,
    pub expiry_percentage: f64,
    pub avg_ttl: String,
}

impl From<&KeyspaceInfo> for KeyspaceReport {
    fn from(info: &KeyspaceInfo) -> Self {
        Self {
            info: *info,
            expiry_percentage: info.expiry_percentage(),
            avg_ttl: info.formatted_ttl(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub version: String,
    pub used_memory_mb: f64,
    pub used_memory_peak_mb: f64,
    pub max_memory_mb: Option<f64>,
    pub memory_usage_percentage: Option<f64>,
    pub memory_usage_level: Option<UsageLevel>,
    pub connected_clients: u64,
    pub uptime_seconds: u64,
    pub uptime: String,
    pub total_keys: u64,
    pub total_expires: u64,
    pub keyspace: Vec<KeyspaceReport>,
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl From<&RedisStatistics> for StatisticsReport {
    fn from(stats: &RedisStatistics) -> Self {
        let usage = stats.memory_usage_percentage();
        Self {
            version: stats.version.clone(),
            used_memory_mb: stats.used_memory_mb,
            used_memory_peak_mb: stats.used_memory_peak_mb,
            max_memory_mb: stats.max_memory_mb,
            memory_usage_percentage: usage,
            memory_usage_level: usage.map(UsageLevel::from_percentage),
            connected_clients: stats.connected_clients,
            uptime_seconds: stats.uptime_seconds,
            uptime: stats.formatted_uptime(),
            total_keys: stats.total_keys(),
            total_expires: stats.total_expires(),
            keyspace: stats.keyspace.values().map(KeyspaceReport::from).collect(),
            collected_at: stats.collected_at,
        }
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Redis {}", self.version)?;
        writeln!(f, "  uptime:        {}", self.uptime)?;
        writeln!(f, "  clients:       {}", self.connected_clients)?;
        match (self.max_memory_mb, self.memory_usage_percentage) {
            (Some(max), Some(pct)) => writeln!(
                f,
                "  memory:        {} of {} ({:.2}%, {})",
                format_megabytes(self.used_memory_mb),
                format_megabytes(max),
                pct,
                UsageLevel::from_percentage(pct)
            )?,
            _ => writeln!(
                f,
                "  memory:        {} (no limit)",
                format_megabytes(self.used_memory_mb)
            )?,
        }
        writeln!(
            f,
            "  peak memory:   {}",
            format_megabytes(self.used_memory_peak_mb)
        )?;
        writeln!(
            f,
            "  keys:          {} ({} with expiry)",
            self.total_keys, self.total_expires
        )?;
        for db in &self.keyspace {
            writeln!(
                f,
                "    db{}: {} keys, {} expires ({:.2}%), avg ttl {}",
                db.info.database, db.info.keys, db.info.expires, db.expiry_percentage, db.avg_ttl
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlushReport {
    #[serde(flatten)]
    pub result: FlushResult,
    pub memory_freed_mb: f64,
    pub memory_freed_percentage: f64,
    pub execution_time_seconds: f64,
}

impl From<&FlushResult> for FlushReport {
    fn from(result: &FlushResult) -> Self {
        Self {
            result: result.clone(),
            memory_freed_mb: result.memory_freed_mb(),
            memory_freed_percentage: result.memory_freed_percentage(),
            execution_time_seconds: result.execution_time_seconds(),
        }
    }
}

impl fmt::Display for FlushReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.result.success {
            return writeln!(
                f,
                "Flush failed: {}",
                self.result.error_message.as_deref().unwrap_or("unknown error")
            );
        }

        writeln!(f, "Flushed via {}", self.result.targets_flushed.join(", "))?;
        writeln!(
            f,
            "  memory:        {} -> {} (freed {}, {:.2}%)",
            format_megabytes(self.result.memory_before_mb),
            format_megabytes(self.result.memory_after_mb),
            format_megabytes(self.memory_freed_mb),
            self.memory_freed_percentage
        )?;
        writeln!(f, "  keys removed:  ~{}", self.result.keys_deleted)?;
        writeln!(f, "  took:          {:.3}s", self.execution_time_seconds)
    }
}
