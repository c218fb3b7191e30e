//! Account lifecycle service coordinating the authentication flows
//!
//! Composes the hashing, code, reset-token, session-token and OAuth
//! collaborators into the public flows: register, login, verify-code,
//! resend-code, forgot-password, reset-password, OAuth login and
//! account completion.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::{AccountProfile, AuthResponse, CodeIssued, OauthLogin};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::credential::CredentialHasher;
use crate::services::oauth::{OauthExchange, ProviderClient, StateStore};
use crate::services::reset::ResetTokenIssuer;
use crate::services::token::TokenSigner;
use crate::services::verification::{EmailNotifier, SecretCodeIssuer};

use super::config::AccountLifecycleConfig;
use super::identity::{is_email, mask_email, normalize_email};
use super::validate::{
    parse_company_type, validate_email, validate_password, validate_person_name,
};

/// Account lifecycle service for managing the complete authentication flow
pub struct AccountLifecycle<U: AccountRepository> {
    /// Account repository for persistence
    accounts: Arc<U>,
    /// Outbound email delivery
    notifier: Arc<dyn EmailNotifier>,
    /// Bcrypt hasher shared with the reset-token issuer
    hasher: Arc<CredentialHasher>,
    /// Session token signer
    signer: Arc<TokenSigner>,
    /// Password-reset token issuer
    reset_tokens: ResetTokenIssuer,
    /// Provider-backed login flow
    oauth: OauthExchange<U>,
    /// Service configuration
    config: AccountLifecycleConfig,
}

impl<U: AccountRepository> AccountLifecycle<U> {
    /// Create a new account lifecycle service
    pub fn new(
        accounts: Arc<U>,
        notifier: Arc<dyn EmailNotifier>,
        hasher: Arc<CredentialHasher>,
        signer: Arc<TokenSigner>,
        provider: Arc<dyn ProviderClient>,
        states: Arc<dyn StateStore>,
        config: AccountLifecycleConfig,
    ) -> Self {
        let reset_tokens = ResetTokenIssuer::new(Arc::clone(&hasher));
        let oauth = OauthExchange::new(Arc::clone(&accounts), provider, states);
        Self {
            accounts,
            notifier,
            hasher,
            signer,
            reset_tokens,
            oauth,
            config,
        }
    }

    /// Register a new password-backed account
    ///
    /// Validates every field, enforces email/name uniqueness (pre-checked
    /// here, authoritatively enforced by the store at create time), hashes
    /// the password and returns a session token immediately. Registration
    /// skips the one-time-code step; every later login requires it.
    pub async fn register(
        &self,
        company_type: &str,
        name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<AuthResponse> {
        validate_person_name("name", name)?;
        validate_person_name("last_name", last_name)?;
        validate_email(email)?;
        validate_password(password, confirm_password)?;
        let company_type = parse_company_type(company_type)?;

        let email = normalize_email(email);
        let name = name.trim().to_string();
        let last_name = last_name.trim().to_string();

        // Pre-check; the store's unique constraints remain the authority
        if self.accounts.exists_by_email(&email).await? {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }
        if self.accounts.exists_by_name(&name).await? {
            return Err(DomainError::Conflict {
                field: "name".to_string(),
            });
        }

        let credential_hash = self.hasher.hash(password).await?;
        let account = Account::new_password(name, last_name, email, credential_hash, company_type);
        let created = self.accounts.create(account).await?;

        tracing::info!(
            account_id = %created.id,
            email = %mask_email(&created.email),
            event = "account_registered",
            "Registered new account"
        );

        let token = self.signer.issue(created.id)?;
        Ok(AuthResponse::new(token, &created))
    }

    /// Start a password login by issuing a one-time code
    ///
    /// The identifier may be an email address or a display name. All
    /// credential failures surface as the undifferentiated
    /// `InvalidCredentials`. A code is only considered issued once the
    /// notifier has delivered it; on delivery failure the stored code is
    /// rolled back and `Notification` is returned.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<CodeIssued> {
        let account = self
            .resolve_identifier(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let hash = match account.credential_hash.as_deref() {
            Some(hash) => hash.to_string(),
            None => return Err(DomainError::Auth(AuthError::InvalidCredentials)),
        };

        if !self.hasher.verify(password, &hash).await? {
            tracing::warn!(
                account_id = %account.id,
                event = "login_rejected",
                "Password verification failed"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        self.issue_and_send_code(account).await
    }

    /// Complete a login by confirming the one-time code
    ///
    /// On success the code is cleared, the account becomes `Verified` and
    /// a session token is returned.
    pub async fn verify_code(&self, identifier: &str, code: &str) -> DomainResult<AuthResponse> {
        if !SecretCodeIssuer::well_formed(code) {
            return Err(DomainError::Auth(AuthError::InvalidCode));
        }

        let mut account = self
            .resolve_identifier(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCode))?;

        let stored = account
            .one_time_code
            .clone()
            .ok_or(DomainError::Auth(AuthError::InvalidCode))?;

        let now = Utc::now();
        if account.code_expired(now) {
            account.clear_code();
            self.accounts.save(account).await?;
            return Err(DomainError::Auth(AuthError::CodeExpired));
        }

        if !SecretCodeIssuer::matches(&stored, code) {
            return Err(DomainError::Auth(AuthError::InvalidCode));
        }

        account.mark_verified();
        let saved = self.accounts.save(account).await?;

        tracing::info!(
            account_id = %saved.id,
            event = "code_verified",
            "One-time code confirmed"
        );

        let token = self.signer.issue(saved.id)?;
        Ok(AuthResponse::new(token, &saved))
    }

    /// Issue a fresh one-time code regardless of current state
    ///
    /// Unlike login, an unknown identifier fails `AccountNotFound` here;
    /// a resend always follows a login that already resolved the account.
    pub async fn resend_code(&self, identifier: &str) -> DomainResult<CodeIssued> {
        let account = self
            .resolve_identifier(identifier)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))?;

        self.issue_and_send_code(account).await
    }

    /// Start a password reset
    ///
    /// Succeeds whether or not the email maps to an account so callers
    /// cannot probe for registered addresses. When it does, a single-use
    /// reset token is stored hashed and the raw token travels only inside
    /// the reset email.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        let Some(mut account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!(
                email = %mask_email(&email),
                event = "reset_requested_unknown",
                "Password reset requested for unknown email"
            );
            return Ok(());
        };

        let (raw_token, token_hash) = self.reset_tokens.issue().await?;
        account.set_reset_token(token_hash, Utc::now());
        let saved = self.accounts.save(account).await?;

        let send_result = self
            .notifier
            .send_password_reset(&saved.email, &raw_token, &self.config.reset_return_url())
            .await;

        if let Err(e) = send_result {
            tracing::error!(
                account_id = %saved.id,
                error = %e,
                event = "reset_email_failed",
                "Rolling back reset token after delivery failure"
            );
            let mut rollback = saved;
            rollback.clear_reset_token();
            if let Err(save_err) = self.accounts.save(rollback).await {
                tracing::error!(
                    error = %save_err,
                    event = "reset_rollback_failed",
                    "Failed to roll back undelivered reset token"
                );
            }
            return Err(DomainError::Notification {
                message: format!("failed to send reset email: {}", e),
            });
        }

        tracing::info!(
            account_id = %saved.id,
            event = "reset_email_sent",
            "Password reset email sent"
        );
        Ok(())
    }

    /// Consume a reset token and replace the password
    ///
    /// Raw tokens are matched by bcrypt-comparing against every live
    /// candidate hash; the random salt rules out a keyed lookup.
    pub async fn reset_password(
        &self,
        raw_token: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<()> {
        validate_password(password, confirm_password)?;

        let now = Utc::now();
        let candidates = self.accounts.find_active_reset_candidates(now).await?;
        let mut account = self
            .reset_tokens
            .match_candidate(raw_token, &candidates)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidOrExpiredToken))?;

        let credential_hash = self.hasher.hash(password).await?;
        account.set_credential_hash(credential_hash);
        account.clear_reset_token();
        let saved = self.accounts.save(account).await?;

        tracing::info!(
            account_id = %saved.id,
            event = "password_reset",
            "Password replaced via reset token"
        );
        Ok(())
    }

    /// Issue a CSRF state value for the provider authorization redirect
    pub async fn issue_oauth_state(&self) -> DomainResult<String> {
        self.oauth.issue_state().await
    }

    /// Handle the provider callback and open a session
    pub async fn oauth_login(
        &self,
        code: &str,
        state: &str,
        redirect_uri: &str,
    ) -> DomainResult<OauthLogin> {
        let account = self.oauth.handle_callback(code, state, redirect_uri).await?;
        let token = self.signer.issue(account.id)?;
        Ok(OauthLogin {
            token,
            needs_company_type: account.needs_company_type(),
            account: AccountProfile::from(&account),
        })
    }

    /// Set the company type on a provider-created account
    ///
    /// Idempotent when re-invoked with the already-stored value; any
    /// attempt to overwrite with a different value fails
    /// `AlreadyCompleted`.
    pub async fn complete_account(
        &self,
        account_id: Uuid,
        company_type: &str,
    ) -> DomainResult<AccountProfile> {
        let company_type = parse_company_type(company_type)?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))?;

        match account.company_type {
            Some(existing) if existing == company_type => Ok(AccountProfile::from(&account)),
            Some(_) => Err(DomainError::Auth(AuthError::AlreadyCompleted)),
            None => {
                account.set_company_type(company_type);
                let saved = self.accounts.save(account).await?;
                tracing::info!(
                    account_id = %saved.id,
                    event = "account_completed",
                    "Company type set"
                );
                Ok(AccountProfile::from(&saved))
            }
        }
    }

    /// Check whether an email is free for registration
    pub async fn is_email_available(&self, email: &str) -> DomainResult<bool> {
        validate_email(email)?;
        let email = normalize_email(email);
        Ok(!self.accounts.exists_by_email(&email).await?)
    }

    /// Check whether a display name is free for registration
    pub async fn is_name_available(&self, name: &str) -> DomainResult<bool> {
        validate_person_name("name", name)?;
        Ok(!self.accounts.exists_by_name(name.trim()).await?)
    }

    /// Load the profile for an authenticated account
    pub async fn profile(&self, account_id: Uuid) -> DomainResult<AccountProfile> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::AccountNotFound))?;
        Ok(AccountProfile::from(&account))
    }

    /// Resolve a login identifier to an account
    ///
    /// An identifier that parses as an email is looked up by normalized
    /// email; anything else is treated as a display name and matched
    /// case-insensitively.
    async fn resolve_identifier(&self, identifier: &str) -> DomainResult<Option<Account>> {
        if is_email(identifier) {
            self.accounts
                .find_by_email(&normalize_email(identifier))
                .await
        } else {
            self.accounts.find_by_name(identifier.trim()).await
        }
    }

    /// Issue a one-time code, persist it, then deliver it
    ///
    /// Delivery failure rolls the account back to its pre-issue state so
    /// no undelivered code stays live.
    async fn issue_and_send_code(&self, mut account: Account) -> DomainResult<CodeIssued> {
        let previous_state = account.verification;
        let code = SecretCodeIssuer::generate();
        account.issue_code(code.clone(), Utc::now());
        let saved = self.accounts.save(account).await?;

        // Expiry was just set by issue_code
        let expires_at = saved
            .one_time_code_expires_at
            .ok_or_else(|| DomainError::Internal {
                message: "issued code has no expiry".to_string(),
            })?;

        if let Err(e) = self
            .notifier
            .send_verification_code(&saved.email, &code)
            .await
        {
            tracing::error!(
                account_id = %saved.id,
                error = %e,
                event = "code_email_failed",
                "Rolling back one-time code after delivery failure"
            );
            let mut rollback = saved;
            rollback.clear_code();
            rollback.verification = previous_state;
            if let Err(save_err) = self.accounts.save(rollback).await {
                tracing::error!(
                    error = %save_err,
                    event = "code_rollback_failed",
                    "Failed to roll back undelivered code"
                );
            }
            return Err(DomainError::Notification {
                message: format!("failed to send verification code: {}", e),
            });
        }

        tracing::info!(
            account_id = %saved.id,
            event = "code_issued",
            "One-time code issued and delivered"
        );
        Ok(CodeIssued { expires_at })
    }
}
