//! Traits for identity provider and state-store integration

use async_trait::async_trait;

/// Identity asserted by the external provider after a code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    /// Email address asserted by the provider
    pub email: String,
    /// Display name asserted by the provider, may be empty
    pub name: String,
    /// Provider-scoped stable subject identifier
    pub subject: String,
}

/// Trait for the OAuth authorization-code exchange
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Exchange an authorization code for the holder's identity
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderIdentity, String>;
}

/// Trait for the single-use CSRF state store
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Record a freshly issued state value with a TTL in seconds
    async fn put(&self, state: &str, ttl_seconds: u64) -> Result<(), String>;

    /// Atomically consume a state value
    ///
    /// Returns `true` exactly once per stored state; a second consume of
    /// the same value, or a consume of an unknown or expired value,
    /// returns `false`.
    async fn consume(&self, state: &str) -> Result<bool, String>;
}
