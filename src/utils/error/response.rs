//! HTTP response handling for errors

use super::error::AdminError;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for AdminError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AdminError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            AdminError::Redis(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "CACHE_ERROR",
                "Cache operation failed".to_string(),
            ),
            AdminError::Unavailable(_) => (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                self.to_string(),
            ),
            AdminError::Command(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "COMMAND_FAILED",
                self.user_message(),
            ),
            AdminError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
