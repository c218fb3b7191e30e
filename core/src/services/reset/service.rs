//! Password-reset token generation and matching

use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;
use crate::services::credential::CredentialHasher;

/// Byte length of a raw reset token (64 hex chars on the wire)
pub const RESET_TOKEN_BYTES: usize = 32;

/// Issues and matches single-use password-reset tokens
///
/// Only the bcrypt hash of a token is ever stored; the raw hex token
/// travels once, inside the reset email.
pub struct ResetTokenIssuer {
    hasher: Arc<CredentialHasher>,
}

impl ResetTokenIssuer {
    pub fn new(hasher: Arc<CredentialHasher>) -> Self {
        Self { hasher }
    }

    /// Generate a raw token and its storable hash
    ///
    /// # Returns
    ///
    /// `(raw_token, token_hash)` - the raw hex token for the email and
    /// the bcrypt hash for the account row
    pub async fn issue(&self) -> DomainResult<(String, String)> {
        let mut rng = OsRng;
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rng.fill_bytes(&mut bytes);
        let raw = hex::encode(bytes);
        let hash = self.hasher.hash(&raw).await?;
        Ok((raw, hash))
    }

    /// Find which candidate account the presented token belongs to
    ///
    /// Bcrypt-compares the token against each candidate's stored hash
    /// and returns the first match.
    pub async fn match_candidate(
        &self,
        raw_token: &str,
        candidates: &[Account],
    ) -> DomainResult<Option<Account>> {
        for candidate in candidates {
            if let Some(ref hash) = candidate.reset_token_hash {
                if self.hasher.verify(raw_token, hash).await? {
                    return Ok(Some(candidate.clone()));
                }
            }
        }
        Ok(None)
    }
}
