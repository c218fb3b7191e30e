//! # Infrastructure Layer
//!
//! Concrete implementations behind the core crate's seams:
//! - **Database**: MySQL account repository using SQLx
//! - **Email**: SMTP delivery of one-time codes and reset links via lettre
//! - **OAuth**: Google code exchange over HTTPS
//! - **State**: single-use OAuth state stores (Redis or in-memory)

pub mod database;
pub mod email;
pub mod oauth;
pub mod state;

pub use database::{create_pool, DatabaseConfig, MySqlAccountRepository};
pub use email::{SmtpConfig, SmtpNotifier};
pub use oauth::{GoogleOauthConfig, GoogleProvider};
pub use state::{MemoryStateStore, RedisStateStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("State store error: {0}")]
    State(#[from] redis::RedisError),

    /// HTTP request error for the OAuth provider
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMTP transport error
    #[error("Email transport error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
