//! Traits for outbound email integration

use async_trait::async_trait;

/// Trait for email delivery
///
/// Implementations talk to an SMTP relay or a test double. Errors are
/// plain strings; callers decide how a delivery failure affects the
/// surrounding flow.
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Send a one-time login code to the given address
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String>;

    /// Send a password-reset link to the given address
    ///
    /// The raw token travels only here; implementations embed it in the
    /// return URL as the `token` query parameter.
    async fn send_password_reset(
        &self,
        email: &str,
        raw_token: &str,
        return_url: &str,
    ) -> Result<(), String>;
}
