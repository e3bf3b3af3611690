//! # redis-admin
//!
//! Redis statistics and flush coordination for a cache layer made of heterogeneous
//! backends.
//!
//! ## Features
//!
//! - **Connection discovery**: finds the Redis-backed entries of a backend pool,
//!   unwrapping synchronized wrappers and legacy client handles
//! - **Statistics**: memory, clients, uptime and per-database keyspace from `INFO`
//! - **Flush coordination**: one `FLUSHALL` with before/after measurement and
//!   notifications
//! - **Admin surfaces**: a CLI and an HTTP API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redis_admin::{BackendPool, Config, RedisAdmin};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/redis-admin.yaml").await?;
//!     let admin = RedisAdmin::new(BackendPool::from_config(config.backends())?);
//!
//!     if let Some(stats) = admin.get_statistics().await {
//!         println!("{} keys, {:.2} MB", stats.total_keys(), stats.used_memory_mb);
//!     }
//!
//!     let result = admin.flush_all().await;
//!     println!("freed {:.2} MB", result.memory_freed_mb());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod admin;
pub mod config;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use admin::{
    FlushReport, FlushResult, KeyspaceInfo, RedisAdmin, RedisStatistics, StatisticsReport,
};
pub use config::Config;
pub use storage::{BackendPool, CacheBackend, StoreClient};
pub use utils::error::{AdminError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
