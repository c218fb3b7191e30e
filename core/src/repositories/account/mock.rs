//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// In-memory account repository for testing
///
/// Enforces the same uniqueness and version rules a database-backed
/// implementation would.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed the repository with an existing account
    pub async fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
    }

    /// Snapshot of a stored account, bypassing the trait
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).cloned()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Conflict {
                field: "email".to_string(),
            });
        }
        if accounts
            .values()
            .any(|a| a.name.eq_ignore_ascii_case(&account.name))
        {
            return Err(DomainError::Conflict {
                field: "name".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts.get(&account.id).ok_or(DomainError::NotFound {
            resource: "Account".to_string(),
        })?;

        if stored.version != account.version {
            return Err(DomainError::Conflict {
                field: "version".to_string(),
            });
        }

        let mut saved = account;
        saved.version += 1;
        accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_active_reset_candidates(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .filter(|a| a.reset_token_live(now))
            .cloned()
            .collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.name.eq_ignore_ascii_case(name)))
    }
}
