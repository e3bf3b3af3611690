//! Integration tests for redis-admin
//!
//! These tests drive the public API with stub store clients; no Redis server is
//! needed.

pub mod config_tests;
pub mod routes_tests;
