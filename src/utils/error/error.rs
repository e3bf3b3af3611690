//! Error types for the Redis admin service
//!
//! Discovery and statistics collection never surface these to their callers; they are
//! logged and degraded. The flush coordinator folds them into a failed `FlushResult`.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AdminError>;

/// Main error type
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis client errors
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No store connection could be discovered or reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Store reply was not in the expected shape
    #[error("Parsing error: {0}")]
    Parse(String),

    /// The store rejected or failed a command
    #[error("Command failed: {0}")]
    Command(String),

    /// A backend could not be inspected for its store client
    #[error("Introspection error: {0}")]
    Introspection(String),

    /// Operation not permitted by configuration
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper functions for creating specific errors
#[allow(dead_code)]
impl AdminError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command(message.into())
    }

    pub fn introspection<S: Into<String>>(message: S) -> Self {
        Self::Introspection(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Message safe to show to an operator: store error text when there is one,
    /// a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Redis(e) => match e.detail() {
                Some(detail) => detail.to_string(),
                None => e.to_string(),
            },
            AdminError::Command(message) | AdminError::Unavailable(message) => message.clone(),
            AdminError::Parse(_) => "unexpected reply from the store".to_string(),
            _ => "an unexpected error occurred".to_string(),
        }
    }
}
