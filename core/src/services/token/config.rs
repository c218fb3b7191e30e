//! Configuration for the token signer

use crate::domain::entities::claims::SESSION_EXPIRY_DAYS;

/// Configuration for the token signer
#[derive(Debug, Clone)]
pub struct TokenSignerConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Session token expiry in days
    pub session_expiry_days: i64,
}

impl Default for TokenSignerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            session_expiry_days: SESSION_EXPIRY_DAYS,
        }
    }
}
