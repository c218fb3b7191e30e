//! MySQL implementation of the AccountRepository trait.
//!
//! Account rows carry a `version` column used for optimistic locking:
//! `save` only touches the row when the caller's version still matches,
//! and every successful save bumps it by one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tp_core::domain::entities::account::{Account, CompanyType, VerificationState};
use tp_core::errors::DomainError;
use tp_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, company_type, name, last_name, email, credential_hash, \
     oauth_linked, verification, one_time_code, one_time_code_expires_at, \
     reset_token_hash, reset_token_expires_at, created_at, updated_at, version";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::column_error("id", e))?;
        let company_type: Option<String> = row
            .try_get("company_type")
            .map_err(|e| Self::column_error("company_type", e))?;
        let verification: String = row
            .try_get("verification")
            .map_err(|e| Self::column_error("verification", e))?;

        let company_type = match company_type {
            Some(value) => Some(CompanyType::parse(&value).ok_or_else(|| {
                DomainError::Internal {
                    message: format!("Unknown company_type in store: {}", value),
                }
            })?),
            None => None,
        };

        let verification = VerificationState::parse(&verification).ok_or_else(|| {
            DomainError::Internal {
                message: format!("Unknown verification state in store: {}", verification),
            }
        })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            company_type,
            name: row
                .try_get("name")
                .map_err(|e| Self::column_error("name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| Self::column_error("last_name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::column_error("email", e))?,
            credential_hash: row
                .try_get("credential_hash")
                .map_err(|e| Self::column_error("credential_hash", e))?,
            oauth_linked: row
                .try_get("oauth_linked")
                .map_err(|e| Self::column_error("oauth_linked", e))?,
            verification,
            one_time_code: row
                .try_get("one_time_code")
                .map_err(|e| Self::column_error("one_time_code", e))?,
            one_time_code_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("one_time_code_expires_at")
                .map_err(|e| Self::column_error("one_time_code_expires_at", e))?,
            reset_token_hash: row
                .try_get("reset_token_hash")
                .map_err(|e| Self::column_error("reset_token_hash", e))?,
            reset_token_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_expires_at")
                .map_err(|e| Self::column_error("reset_token_expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::column_error("updated_at", e))?,
            version: row
                .try_get("version")
                .map_err(|e| Self::column_error("version", e))?,
        })
    }

    fn column_error(column: &str, e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        }
    }

    /// Map a MySQL duplicate-key error to the conflicting field
    fn map_create_error(e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                let field = if message.contains("email") {
                    "email"
                } else {
                    "name"
                };
                return DomainError::Conflict {
                    field: field.to_string(),
                };
            }
        }
        DomainError::Internal {
            message: format!("Failed to create account: {}", e),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE email = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, DomainError> {
        // The name column uses a case-insensitive collation
        let query = format!(
            "SELECT {} FROM accounts WHERE name = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by name: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE id = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, company_type, name, last_name, email, credential_hash,
                oauth_linked, verification, one_time_code, one_time_code_expires_at,
                reset_token_hash, reset_token_expires_at, created_at, updated_at, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(account.company_type.map(|ct| ct.as_str()))
            .bind(&account.name)
            .bind(&account.last_name)
            .bind(&account.email)
            .bind(&account.credential_hash)
            .bind(account.oauth_linked)
            .bind(account.verification.as_str())
            .bind(&account.one_time_code)
            .bind(account.one_time_code_expires_at)
            .bind(&account.reset_token_hash)
            .bind(account.reset_token_expires_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.version)
            .execute(&self.pool)
            .await
            .map_err(Self::map_create_error)?;

        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                company_type = ?, name = ?, last_name = ?, email = ?,
                credential_hash = ?, oauth_linked = ?, verification = ?,
                one_time_code = ?, one_time_code_expires_at = ?,
                reset_token_hash = ?, reset_token_expires_at = ?,
                updated_at = ?, version = version + 1
            WHERE id = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(account.company_type.map(|ct| ct.as_str()))
            .bind(&account.name)
            .bind(&account.last_name)
            .bind(&account.email)
            .bind(&account.credential_hash)
            .bind(account.oauth_linked)
            .bind(account.verification.as_str())
            .bind(&account.one_time_code)
            .bind(account.one_time_code_expires_at)
            .bind(&account.reset_token_hash)
            .bind(account.reset_token_expires_at)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .bind(account.version)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save account: {}", e),
            })?;

        if result.rows_affected() == 0 {
            // Missing row and stale version are told apart by a lookup
            return match self.find_by_id(account.id).await? {
                Some(_) => Err(DomainError::Conflict {
                    field: "version".to_string(),
                }),
                None => Err(DomainError::NotFound {
                    resource: "account".to_string(),
                }),
            };
        }

        let mut saved = account;
        saved.version += 1;
        Ok(saved)
    }

    async fn find_active_reset_candidates(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts \
             WHERE reset_token_hash IS NOT NULL AND reset_token_expires_at >= ?",
            ACCOUNT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list reset candidates: {}", e),
            })?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            accounts.push(Self::row_to_account(&row)?);
        }
        Ok(accounts)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check email existence: {}", e),
            })?;

        let found: i8 = row
            .try_get("found")
            .map_err(|e| Self::column_error("found", e))?;
        Ok(found == 1)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE name = ?) AS found")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check name existence: {}", e),
            })?;

        let found: i8 = row
            .try_get("found")
            .map_err(|e| Self::column_error("found", e))?;
        Ok(found == 1)
    }
}
