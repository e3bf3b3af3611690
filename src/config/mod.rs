//! Configuration management
//!
//! This module handles loading and validation of the admin service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AdminError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Admin configuration
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AdminError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let admin: AdminConfig = serde_yaml::from_str(content)
            .map_err(|e| AdminError::config(format!("Failed to parse config: {}", e)))?;

        let config = Self { admin };
        config.validate()?;

        debug!(
            "Configuration loaded with {} backend(s)",
            config.admin.backends.len()
        );
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut admin = AdminConfig::default();

        if let Some(url) = lookup("REDIS_URL") {
            admin.backends.push(BackendConfig::redis("default", url));
        }
        if let Some(host) = lookup("REDIS_ADMIN_HOST") {
            admin.server.host = host;
        }
        if let Some(port) = lookup("REDIS_ADMIN_PORT") {
            admin.server.port = port
                .parse()
                .map_err(|e| AdminError::config(format!("Invalid port: {}", e)))?;
        }
        if let Some(allow) = lookup("REDIS_ADMIN_ALLOW_FLUSH") {
            admin.server.allow_flush = parse_flag(&allow)?;
        }
        if let Some(level) = lookup("REDIS_ADMIN_LOG_LEVEL") {
            admin.logging.level = level;
        }
        if let Some(json) = lookup("REDIS_ADMIN_LOG_JSON") {
            admin.logging.json = parse_flag(&json)?;
        }

        let config = Self { admin };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.admin.validate()
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.admin.server
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.admin.logging
    }

    /// Get configured backends
    pub fn backends(&self) -> &[BackendConfig] {
        &self.admin.backends
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AdminError::config(format!("Invalid boolean flag: {}", other))),
    }
}
