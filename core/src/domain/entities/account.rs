//! Account entity representing a registered account in the TrackPerf system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of company an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyType {
    /// Sales organisation
    Sales,
    /// Real estate agency
    RealEstate,
    /// Telemarketing operation
    Telemarketing,
    /// General agency
    Agency,
}

impl CompanyType {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Sales => "sales",
            CompanyType::RealEstate => "real-estate",
            CompanyType::Telemarketing => "telemarketing",
            CompanyType::Agency => "agency",
        }
    }

    /// Parses the persisted string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sales" => Some(CompanyType::Sales),
            "real-estate" => Some(CompanyType::RealEstate),
            "telemarketing" => Some(CompanyType::Telemarketing),
            "agency" => Some(CompanyType::Agency),
            _ => None,
        }
    }
}

/// Verification progress of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    /// Account exists but no one-time code is outstanding
    Unverified,
    /// A one-time code has been issued and awaits confirmation
    CodeIssued,
    /// The account holder has proven control of the email address
    Verified,
}

impl VerificationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::Unverified => "unverified",
            VerificationState::CodeIssued => "code_issued",
            VerificationState::Verified => "verified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unverified" => Some(VerificationState::Unverified),
            "code_issued" => Some(VerificationState::CodeIssued),
            "verified" => Some(VerificationState::Verified),
            _ => None,
        }
    }
}

/// Lifetime of an issued one-time code
pub const CODE_TTL_MINUTES: i64 = 15;

/// Lifetime of an issued password-reset token
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Account entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Company category, absent until the holder picks one
    pub company_type: Option<CompanyType>,

    /// Given name, unique case-insensitively across accounts
    pub name: String,

    /// Family name
    pub last_name: String,

    /// Email address stored lowercased and trimmed, unique across accounts
    pub email: String,

    /// Bcrypt hash of the password; absent for provider-only accounts
    pub credential_hash: Option<String>,

    /// Whether an external identity provider is linked to this account
    pub oauth_linked: bool,

    /// Verification progress
    pub verification: VerificationState,

    /// Outstanding one-time code, if any
    pub one_time_code: Option<String>,

    /// Expiry of the outstanding one-time code
    pub one_time_code_expires_at: Option<DateTime<Utc>>,

    /// Bcrypt hash of the outstanding password-reset token, if any
    pub reset_token_hash: Option<String>,

    /// Expiry of the outstanding password-reset token
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Optimistic concurrency stamp, bumped by the store on every save
    pub version: i64,
}

impl Account {
    /// Creates a new password-backed account
    pub fn new_password(
        name: String,
        last_name: String,
        email: String,
        credential_hash: String,
        company_type: CompanyType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_type: Some(company_type),
            name,
            last_name,
            email,
            credential_hash: Some(credential_hash),
            oauth_linked: false,
            verification: VerificationState::Verified,
            one_time_code: None,
            one_time_code_expires_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Creates a new provider-only account with no local credential
    pub fn new_oauth(name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_type: None,
            name,
            last_name,
            email,
            credential_hash: None,
            oauth_linked: true,
            verification: VerificationState::Verified,
            one_time_code: None,
            one_time_code_expires_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Records a freshly issued one-time code
    pub fn issue_code(&mut self, code: String, now: DateTime<Utc>) {
        self.one_time_code = Some(code);
        self.one_time_code_expires_at = Some(now + Duration::minutes(CODE_TTL_MINUTES));
        self.verification = VerificationState::CodeIssued;
        self.updated_at = Utc::now();
    }

    /// Clears any outstanding one-time code without changing verification
    pub fn clear_code(&mut self) {
        self.one_time_code = None;
        self.one_time_code_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Marks the account verified and discards the outstanding code
    pub fn mark_verified(&mut self) {
        self.one_time_code = None;
        self.one_time_code_expires_at = None;
        self.verification = VerificationState::Verified;
        self.updated_at = Utc::now();
    }

    /// Records a freshly issued password-reset token hash
    pub fn set_reset_token(&mut self, token_hash: String, now: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_token_expires_at = Some(now + Duration::hours(RESET_TOKEN_TTL_HOURS));
        self.updated_at = Utc::now();
    }

    /// Discards the outstanding password-reset token
    pub fn clear_reset_token(&mut self) {
        self.reset_token_hash = None;
        self.reset_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash
    pub fn set_credential_hash(&mut self, hash: String) {
        self.credential_hash = Some(hash);
        self.updated_at = Utc::now();
    }

    /// Links an external identity provider to this account
    pub fn link_oauth(&mut self) {
        self.oauth_linked = true;
        self.updated_at = Utc::now();
    }

    /// Sets the company type
    pub fn set_company_type(&mut self, company_type: CompanyType) {
        self.company_type = Some(company_type);
        self.updated_at = Utc::now();
    }

    /// Checks whether the holder still needs to pick a company type
    pub fn needs_company_type(&self) -> bool {
        self.company_type.is_none()
    }

    /// Checks whether the outstanding code is expired at `now`
    pub fn code_expired(&self, now: DateTime<Utc>) -> bool {
        match self.one_time_code_expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }

    /// Checks whether the outstanding reset token is live at `now`
    pub fn reset_token_live(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token_hash, self.reset_token_expires_at) {
            (Some(_), Some(expires_at)) => now <= expires_at,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::new_password(
            "Ada".to_string(),
            "Lovelace".to_string(),
            "ada@example.com".to_string(),
            "$2b$10$hash".to_string(),
            CompanyType::Sales,
        )
    }

    #[test]
    fn test_new_password_account() {
        let account = sample_account();

        assert_eq!(account.email, "ada@example.com");
        assert_eq!(account.company_type, Some(CompanyType::Sales));
        assert!(account.credential_hash.is_some());
        assert!(!account.oauth_linked);
        assert_eq!(account.verification, VerificationState::Verified);
        assert_eq!(account.version, 0);
    }

    #[test]
    fn test_new_oauth_account() {
        let account = Account::new_oauth(
            "Grace".to_string(),
            "Hopper".to_string(),
            "grace@example.com".to_string(),
        );

        assert!(account.credential_hash.is_none());
        assert!(account.oauth_linked);
        assert!(account.needs_company_type());
        assert_eq!(account.verification, VerificationState::Verified);
    }

    #[test]
    fn test_issue_and_clear_code() {
        let mut account = sample_account();
        let now = Utc::now();

        account.issue_code("123456".to_string(), now);
        assert_eq!(account.one_time_code.as_deref(), Some("123456"));
        assert_eq!(account.verification, VerificationState::CodeIssued);
        assert!(!account.code_expired(now));
        assert!(!account.code_expired(now + Duration::minutes(CODE_TTL_MINUTES)));
        assert!(account.code_expired(now + Duration::minutes(CODE_TTL_MINUTES) + Duration::seconds(1)));

        account.clear_code();
        assert!(account.one_time_code.is_none());
        assert!(account.one_time_code_expires_at.is_none());
        assert_eq!(account.verification, VerificationState::CodeIssued);
    }

    #[test]
    fn test_mark_verified_discards_code() {
        let mut account = sample_account();
        account.issue_code("654321".to_string(), Utc::now());

        account.mark_verified();
        assert_eq!(account.verification, VerificationState::Verified);
        assert!(account.one_time_code.is_none());
        assert!(account.one_time_code_expires_at.is_none());
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let mut account = sample_account();
        let now = Utc::now();

        assert!(!account.reset_token_live(now));
        account.set_reset_token("$2b$10$tokenhash".to_string(), now);
        assert!(account.reset_token_live(now));
        assert!(account.reset_token_live(now + Duration::hours(RESET_TOKEN_TTL_HOURS)));
        assert!(!account.reset_token_live(now + Duration::hours(RESET_TOKEN_TTL_HOURS) + Duration::seconds(1)));

        account.clear_reset_token();
        assert!(!account.reset_token_live(now));
    }

    #[test]
    fn test_company_type_round_trip() {
        for ct in [
            CompanyType::Sales,
            CompanyType::RealEstate,
            CompanyType::Telemarketing,
            CompanyType::Agency,
        ] {
            assert_eq!(CompanyType::parse(ct.as_str()), Some(ct));
        }
        assert_eq!(CompanyType::parse("retail"), None);
    }

    #[test]
    fn test_company_type_serialization() {
        let json = serde_json::to_string(&CompanyType::RealEstate).unwrap();
        assert_eq!(json, "\"real-estate\"");
    }
}
