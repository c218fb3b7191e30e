//! Environment-derived configuration, built once at startup.
//!
//! Missing `DATABASE_URL` or `JWT_SECRET` is fatal; everything else
//! falls back to development defaults so a local run needs a minimal
//! environment.

use anyhow::{bail, Context, Result};

use tp_infra::database::DatabaseConfig;
use tp_infra::email::SmtpConfig;
use tp_infra::oauth::GoogleOauthConfig;

/// Full runtime configuration for the API process
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// MySQL settings
    pub database: DatabaseConfig,
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Bcrypt cost for credential hashing
    pub bcrypt_cost: u32,
    /// Frontend base URL, used for reset links and CORS
    pub frontend_url: String,
    /// Redirect URI registered with the OAuth provider
    pub oauth_redirect_uri: String,
    /// Redis URL for the OAuth state store; in-memory store when unset
    pub redis_url: Option<String>,
    /// SMTP relay settings
    pub smtp: SmtpConfig,
    /// Google OAuth credentials
    pub google: GoogleOauthConfig,
}

impl ApiConfig {
    /// Load and validate configuration from the environment
    pub fn from_env() -> Result<Self> {
        let database = DatabaseConfig::from_env().context("database configuration")?;

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let oauth_redirect_uri = std::env::var("OAUTH_REDIRECT_URI")
            .unwrap_or_else(|_| format!("{}/oauth/callback", frontend_url.trim_end_matches('/')));

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            database,
            jwt_secret,
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
            frontend_url,
            oauth_redirect_uri,
            redis_url: std::env::var("REDIS_URL").ok(),
            smtp: SmtpConfig::from_env().context("smtp configuration")?,
            google: GoogleOauthConfig::from_env().context("google oauth configuration")?,
        })
    }
}
