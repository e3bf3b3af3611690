//! Error handling utilities
//!
//! This module defines the crate error type and its HTTP response mapping.

pub mod error;
pub mod response;

// Re-export commonly used types
pub use error::*;
pub use response::{ErrorDetail, ErrorResponse};
