//! MySQL connection pool setup

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::InfrastructureError;

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    pub url: String,
    /// Maximum pool size
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Load settings from the environment
    ///
    /// `DATABASE_URL` is required; pool tuning falls back to defaults.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| InfrastructureError::Config("DATABASE_URL is not set".to_string()))?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let acquire_timeout_secs = std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

/// Create a MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        event = "database_pool_created",
        "Connected to MySQL"
    );
    Ok(pool)
}
