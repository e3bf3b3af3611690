//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{AdminError, Result};
use std::collections::HashSet;
use tracing::debug;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for AdminConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating admin configuration");

        self.server.validate()?;
        self.logging.validate()?;

        let mut ids = HashSet::new();
        for backend in &self.backends {
            if backend.id.trim().is_empty() {
                return Err(AdminError::config("Backend id cannot be empty"));
            }
            if !ids.insert(backend.id.as_str()) {
                return Err(AdminError::config(format!(
                    "Duplicate backend id: {}",
                    backend.id
                )));
            }
            backend.validate()?;
        }

        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(AdminError::config("Server host cannot be empty"));
        }
        if self.port == 0 {
            return Err(AdminError::config("Server port must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        // Filter directives such as "redis_admin=debug" are passed through to EnvFilter
        if self.level.contains('=') {
            return Ok(());
        }
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(AdminError::config(format!(
                "Unknown log level: {}",
                self.level
            )));
        }
        Ok(())
    }
}

impl Validate for BackendConfig {
    fn validate(&self) -> Result<()> {
        match self.backend_type {
            kind if kind.is_redis() => match &self.redis {
                Some(redis) => redis.validate().map_err(|e| {
                    AdminError::config(format!("Backend '{}': {}", self.id, e))
                }),
                None => Err(AdminError::config(format!(
                    "Backend '{}' requires a redis section",
                    self.id
                ))),
            },
            BackendType::Synchronized => match &self.remote {
                Some(remote) if remote.backend_type == BackendType::Synchronized => {
                    Err(AdminError::config(format!(
                        "Backend '{}': synchronized backends cannot be nested",
                        self.id
                    )))
                }
                Some(remote) => remote.validate(),
                None => Err(AdminError::config(format!(
                    "Backend '{}' requires a remote backend",
                    self.id
                ))),
            },
            _ => Ok(()),
        }
    }
}

impl Validate for RedisConfig {
    fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(AdminError::config("Redis URL cannot be empty"));
        }

        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(AdminError::config(
                "Redis URL must start with redis:// or rediss://",
            ));
        }

        if self.connection_timeout == 0 {
            return Err(AdminError::config(
                "Redis connection timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}
