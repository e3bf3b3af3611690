//! Configuration models
//!
//! This module contains the configuration data structures loaded from YAML or the
//! environment.

use serde::{Deserialize, Serialize};

/// Default host for the admin HTTP API
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default port for the admin HTTP API
pub fn default_port() -> u16 {
    8089
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// HTTP admin API configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cache backends, in discovery order
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

/// HTTP admin API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether the flush endpoint accepts requests
    #[serde(default)]
    pub allow_flush: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allow_flush: false,
        }
    }
}

impl ServerConfig {
    /// Socket address string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Kind of cache backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Redis backend exposing its client directly
    Redis,
    /// Older Redis backend that keeps its client in an internal handle
    LegacyRedis,
    /// Wrapper that keeps a local backend in sync with a remote one
    Synchronized,
    /// Filesystem cache
    File,
    /// In-process memory cache
    Memory,
}

impl BackendType {
    /// Whether this backend type needs a `redis` section
    pub fn is_redis(&self) -> bool {
        matches!(self, BackendType::Redis | BackendType::LegacyRedis)
    }
}

/// A configured cache backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend identifier; may be omitted on a synchronized backend's `remote`
    #[serde(default)]
    pub id: String,
    /// Backend kind
    #[serde(rename = "type")]
    pub backend_type: BackendType,
    /// Redis connection settings for redis kinds
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    /// Remote backend wrapped by a synchronized backend
    #[serde(default)]
    pub remote: Option<Box<BackendConfig>>,
}

impl BackendConfig {
    /// Plain redis backend
    pub fn redis(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backend_type: BackendType::Redis,
            redis: Some(RedisConfig {
                url: url.into(),
                ..RedisConfig::default()
            }),
            remote: None,
        }
    }
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connection_timeout: default_connection_timeout(),
        }
    }
}
