//! HTTP admin API
//!
//! This module provides the HTTP server and routing for the Redis admin endpoints.

pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
