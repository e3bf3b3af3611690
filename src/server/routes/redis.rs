//! Redis statistics and flush endpoints

use crate::admin::{FlushReport, StatisticsReport};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AdminError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{debug, info, warn};

/// Configure Redis admin routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/redis")
            .route("/statistics", web::get().to(get_statistics))
            .route("/flush", web::post().to(flush_all)),
    );
}

/// Current Redis statistics; 503 when no statistics can be collected
pub async fn get_statistics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Redis statistics requested");

    match state.admin.get_statistics().await {
        Some(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(StatisticsReport::from(&stats)))),
        None => Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            "Redis statistics unavailable".to_string(),
        ))),
    }
}

/// Flush every Redis database
pub async fn flush_all(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    if !state.config.server().allow_flush {
        warn!("Rejected flush request: flushing is disabled");
        return Err(AdminError::forbidden("flushing is disabled by configuration").into());
    }

    info!("Redis flush requested");
    let result = state.admin.flush_all().await;
    let report = FlushReport::from(&result);

    if result.success {
        Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
    } else {
        let message = result
            .error_message
            .clone()
            .unwrap_or_else(|| "flush failed".to_string());
        Ok(HttpResponse::InternalServerError().json(ApiResponse::failure(report, message)))
    }
}
