//! JWT claims for session tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (30 days)
pub const SESSION_EXPIRY_DAYS: i64 = 30;

/// JWT issuer
pub const JWT_ISSUER: &str = "trackperf";

/// JWT audience
pub const JWT_AUDIENCE: &str = "trackperf-api";

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a session token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's UUID
    /// * `expiry_days` - How long the session stays valid
    ///
    /// # Returns
    ///
    /// A new `Claims` instance valid for `expiry_days` days
    pub fn new_session(account_id: Uuid, expiry_days: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(expiry_days);

        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the account ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
