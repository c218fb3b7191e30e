//! Configuration for the account lifecycle service

/// Configuration for the account lifecycle service
#[derive(Debug, Clone)]
pub struct AccountLifecycleConfig {
    /// Base URL the password-reset link points back to
    pub frontend_url: String,
}

impl Default for AccountLifecycleConfig {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AccountLifecycleConfig {
    /// Full return URL for password-reset emails
    pub fn reset_return_url(&self) -> String {
        format!("{}/reset-password", self.frontend_url.trim_end_matches('/'))
    }
}
