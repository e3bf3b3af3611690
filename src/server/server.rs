//! HTTP server core implementation

use crate::admin::RedisAdmin;
use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::BackendPool;
use crate::utils::error::{AdminError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server from configuration
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating HTTP server");

        let pool = BackendPool::from_config(config.backends())?;
        if pool.is_empty() {
            warn!("No cache backends configured; statistics and flush will be unavailable");
        }

        Ok(Self::with_admin(config, RedisAdmin::new(pool)))
    }

    /// Create a server around an existing admin service
    pub fn with_admin(config: Config, admin: RedisAdmin) -> Self {
        Self {
            config: config.server().clone(),
            state: AppState::new(config, admin),
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "redis-admin")))
            .configure(routes::health::configure_routes)
            .configure(routes::redis::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.bind_address();

        info!("Starting HTTP server on {}", bind_addr);
        if !self.config.allow_flush {
            info!("Flush endpoint disabled (server.allow_flush = false)");
        }

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| AdminError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server.await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
