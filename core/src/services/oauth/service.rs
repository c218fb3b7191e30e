//! OAuth login orchestration

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::auth::identity::normalize_email;

use super::traits::{ProviderClient, ProviderIdentity, StateStore};

/// Lifetime of an issued CSRF state value
pub const STATE_TTL_SECONDS: u64 = 600;

/// Byte length of a raw state value (64 hex chars on the wire)
const STATE_BYTES: usize = 32;

/// Orchestrates the provider-backed login flow
///
/// Issues single-use CSRF state, exchanges authorization codes and
/// resolves the asserted identity to a local account, creating or
/// linking as needed.
pub struct OauthExchange<U: AccountRepository> {
    accounts: Arc<U>,
    provider: Arc<dyn ProviderClient>,
    states: Arc<dyn StateStore>,
}

impl<U: AccountRepository> OauthExchange<U> {
    pub fn new(
        accounts: Arc<U>,
        provider: Arc<dyn ProviderClient>,
        states: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            accounts,
            provider,
            states,
        }
    }

    /// Issue a fresh CSRF state value for the authorization redirect
    pub async fn issue_state(&self) -> DomainResult<String> {
        let mut rng = OsRng;
        let mut bytes = [0u8; STATE_BYTES];
        rng.fill_bytes(&mut bytes);
        let state = hex::encode(bytes);

        self.states
            .put(&state, STATE_TTL_SECONDS)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("failed to store state: {}", e),
            })?;

        Ok(state)
    }

    /// Handle the provider callback and resolve a local account
    ///
    /// The state is consumed before anything else; a replayed, unknown or
    /// expired state fails with `CsrfMismatch` without touching the
    /// provider. An existing account with the asserted email is linked in
    /// place, keeping any local credential. A fresh identity becomes a
    /// provider-only account with no company type yet.
    pub async fn handle_callback(
        &self,
        code: &str,
        state: &str,
        redirect_uri: &str,
    ) -> DomainResult<Account> {
        let consumed = self
            .states
            .consume(state)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("failed to consume state: {}", e),
            })?;
        if !consumed {
            tracing::warn!(event = "oauth_state_rejected", "OAuth state replayed or unknown");
            return Err(DomainError::Auth(AuthError::CsrfMismatch));
        }

        let identity = self
            .provider
            .exchange_code(code, redirect_uri)
            .await
            .map_err(|e| DomainError::Provider {
                message: format!("code exchange failed: {}", e),
            })?;

        let email = normalize_email(&identity.email);

        if let Some(mut existing) = self.accounts.find_by_email(&email).await? {
            if !existing.oauth_linked {
                existing.link_oauth();
                existing = self.accounts.save(existing).await?;
                tracing::info!(
                    account_id = %existing.id,
                    event = "oauth_linked",
                    "Linked identity provider to existing account"
                );
            }
            return Ok(existing);
        }

        self.create_from_identity(&identity, email).await
    }

    async fn create_from_identity(
        &self,
        identity: &ProviderIdentity,
        email: String,
    ) -> DomainResult<Account> {
        let (name, last_name) = split_display_name(&identity.name, &email);

        let candidate = Account::new_oauth(name.clone(), last_name.clone(), email.clone());
        match self.accounts.create(candidate).await {
            Ok(created) => {
                tracing::info!(
                    account_id = %created.id,
                    event = "oauth_account_created",
                    "Created account from provider identity"
                );
                Ok(created)
            }
            Err(DomainError::Conflict { field }) if field == "name" => {
                // Disambiguate with a stable suffix derived from the subject
                let suffixed = format!("{}-{}", name, subject_suffix(&identity.subject));
                let retry = Account::new_oauth(suffixed, last_name, email);
                let created = self.accounts.create(retry).await?;
                tracing::info!(
                    account_id = %created.id,
                    event = "oauth_account_created",
                    "Created account from provider identity with disambiguated name"
                );
                Ok(created)
            }
            Err(e) => Err(e),
        }
    }
}

/// Split a provider display name into given and family parts
///
/// Provider names are untrusted: both parts are reduced to the
/// registration charset (letters, spaces, apostrophes, hyphens) and
/// capped at 50 characters. A given name that ends up shorter than two
/// characters falls back to the email local part, then to a neutral
/// placeholder; the collision retry in `create_from_identity` keeps
/// placeholders unique.
fn split_display_name(display_name: &str, email: &str) -> (String, String) {
    let trimmed = display_name.trim();
    let (first_raw, rest_raw) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    let mut name = sanitize_name_part(first_raw);
    let last_name = sanitize_name_part(rest_raw);

    if name.chars().count() < 2 {
        name = sanitize_name_part(email.split('@').next().unwrap_or(email));
    }
    if name.chars().count() < 2 {
        name = "Member".to_string();
    }
    (name, last_name)
}

/// Strip a raw name part down to the permitted name charset
fn sanitize_name_part(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '\'' | '-'))
        .collect();
    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    let capped: String = collapsed.chars().take(50).collect();
    capped.trim().to_string()
}

/// Four stable hex characters derived from the provider subject
fn subject_suffix(subject: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(subject.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_display_name() {
        assert_eq!(
            split_display_name("Ada Lovelace", "ada@example.com"),
            ("Ada".to_string(), "Lovelace".to_string())
        );
        assert_eq!(
            split_display_name("Ada Augusta Lovelace", "ada@example.com"),
            ("Ada".to_string(), "Augusta Lovelace".to_string())
        );
        assert_eq!(
            split_display_name("Plato", "plato@example.com"),
            ("Plato".to_string(), String::new())
        );
        assert_eq!(
            split_display_name("  ", "ada@example.com"),
            ("ada".to_string(), String::new())
        );
    }

    #[test]
    fn test_split_display_name_sanitizes_untrusted_parts() {
        // Digits and symbols are stripped to the registration charset
        assert_eq!(
            split_display_name("Ada99 L0velace!", "ada@example.com"),
            ("Ada".to_string(), "Lvelace".to_string())
        );
        // A name reduced below two characters falls back to the email local part
        assert_eq!(
            split_display_name("7 8", "grace@example.com"),
            ("grace".to_string(), String::new())
        );
        // A hopeless local part falls back to the placeholder
        assert_eq!(
            split_display_name("42", "9@example.com"),
            ("Member".to_string(), String::new())
        );
        // Long names are capped at fifty characters
        let (name, _) = split_display_name(&format!("{} Last", "a".repeat(80)), "x@example.com");
        assert_eq!(name.chars().count(), 50);
    }

    #[test]
    fn test_subject_suffix_stable() {
        let a = subject_suffix("108417623");
        let b = subject_suffix("108417623");
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        assert_ne!(a, subject_suffix("208417623"));
    }
}
