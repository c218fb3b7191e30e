//! Authentication response value objects for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, CompanyType};

/// Public projection of an account, safe to return to clients
///
/// Never carries the credential hash, the one-time code or the
/// reset-token hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountProfile {
    /// Account identifier
    pub id: Uuid,

    /// Given name
    pub name: String,

    /// Family name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Company category, None if not yet selected
    pub company_type: Option<CompanyType>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            company_type: account.company_type,
            created_at: account.created_at,
        }
    }
}

/// Authentication response containing a session token and account metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT session token for API authentication
    pub token: String,

    /// Public profile of the authenticated account
    pub account: AccountProfile,
}

impl AuthResponse {
    pub fn new(token: String, account: &Account) -> Self {
        Self {
            token,
            account: AccountProfile::from(account),
        }
    }
}

/// Outcome of issuing a one-time code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeIssued {
    /// Expiry of the issued code
    pub expires_at: DateTime<Utc>,
}

/// Outcome of an OAuth callback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OauthLogin {
    /// JWT session token for API authentication
    pub token: String,

    /// Public profile of the authenticated account
    pub account: AccountProfile,

    /// Whether the holder still needs to pick a company type
    pub needs_company_type: bool,
}
