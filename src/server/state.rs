//! Application state shared across HTTP handlers

use crate::admin::RedisAdmin;
use crate::config::Config;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Redis administration entry point
    pub admin: Arc<RedisAdmin>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, admin: RedisAdmin) -> Self {
        Self {
            config: Arc::new(config),
            admin: Arc::new(admin),
        }
    }
}
