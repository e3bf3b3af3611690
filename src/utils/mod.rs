//! Utility modules for the Redis admin service
//!
//! ## Module Organization
//!
//! - **error**: Error type and HTTP error mapping
//! - **format**: Human-readable rendering of sizes, durations and usage levels
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod format; // Presentation helpers
pub mod logging; // Logging setup

pub use error::{AdminError, Result};
pub use format::{UsageLevel, format_bytes, format_megabytes, format_ttl, format_uptime};
