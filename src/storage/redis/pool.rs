//! Redis client handle
//!
//! Connections are opened per command, so an unreachable server surfaces as an error
//! from `info`/`flush_all` instead of failing backend construction.

use crate::config::RedisConfig;
use crate::storage::client::{InfoReply, StoreClient};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use redis::{Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Redis connection pool
#[derive(Debug, Clone)]
pub struct RedisPool {
    /// Redis client
    pub(crate) client: Client,
    /// Configuration
    pub(crate) config: RedisConfig,
}

impl RedisPool {
    /// Create a new Redis pool. Only the URL is checked here; no connection is made.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        info!("Creating Redis client for {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(AdminError::Redis)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Open a connection, bounded by the configured connection timeout
    pub(crate) async fn get_connection(&self) -> Result<MultiplexedConnection> {
        let timeout = Duration::from_secs(self.config.connection_timeout);
        debug!("Connecting to {}", self.display_url());

        match tokio::time::timeout(timeout, self.client.get_multiplexed_async_connection()).await
        {
            Ok(connection) => connection.map_err(AdminError::Redis),
            Err(_) => Err(AdminError::unavailable(format!(
                "timed out after {}s connecting to {}",
                self.config.connection_timeout,
                self.display_url()
            ))),
        }
    }

    /// URL with the password masked
    pub fn display_url(&self) -> String {
        Self::sanitize_url(&self.config.url)
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}

#[async_trait]
impl StoreClient for RedisPool {
    async fn info(&self) -> Result<InfoReply> {
        let mut conn = self.get_connection().await?;
        let info: String = redis::cmd("INFO")
            .query_async(&mut conn)
            .await
            .map_err(AdminError::Redis)?;
        Ok(InfoReply::from_text(&info))
    }

    async fn flush_all(&self) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let reply: String = redis::cmd("FLUSHALL")
            .query_async(&mut conn)
            .await
            .map_err(AdminError::Redis)?;
        debug!("FLUSHALL on {} answered {}", self.display_url(), reply);
        Ok(reply.eq_ignore_ascii_case("OK"))
    }
}
