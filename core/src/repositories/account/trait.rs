//! Account repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for Account entities.
//! The trait is async-first and uses Result types for proper error handling.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
///
/// Uniqueness rules implementations must enforce: email is unique after
/// lowercasing, and name is unique case-insensitively.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized (lowercased, trimmed) email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its login name, matched case-insensitively
    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Conflict)` - Email or name already taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist changes to an existing account
    ///
    /// Saves succeed only when the entity's `version` still matches the
    /// stored row; the store bumps the version on success. A stale version
    /// yields `DomainError::Conflict` so the caller can reload and retry.
    ///
    /// # Returns
    /// * `Ok(Account)` - The saved account with its bumped version
    /// * `Err(DomainError::NotFound)` - No account with that id
    /// * `Err(DomainError::Conflict)` - The version was stale
    async fn save(&self, account: Account) -> Result<Account, DomainError>;

    /// List accounts holding a reset token that has not expired at `now`
    ///
    /// Raw reset tokens are never stored, so matching a presented token
    /// means bcrypt-comparing it against each live candidate's hash.
    async fn find_active_reset_candidates(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, DomainError>;

    /// Check whether an account exists with the given normalized email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check whether an account exists with the given name (case-insensitive)
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;
}
