//! Bcrypt password and reset-token hashing

use crate::errors::{DomainError, DomainResult};

/// Minimum permitted bcrypt cost factor
pub const MIN_BCRYPT_COST: u32 = 10;

/// Hashes and verifies secrets with bcrypt
///
/// Bcrypt work runs on the blocking pool so the async executor never
/// stalls on a hash.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Creates a new hasher
    ///
    /// # Returns
    ///
    /// A new `CredentialHasher`, or `DomainError::Configuration` when the
    /// cost factor is below [`MIN_BCRYPT_COST`].
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        if cost < MIN_BCRYPT_COST {
            return Err(DomainError::Configuration {
                message: format!("bcrypt cost must be at least {}", MIN_BCRYPT_COST),
            });
        }
        Ok(Self { cost })
    }

    /// Hash a secret
    pub async fn hash(&self, secret: &str) -> DomainResult<String> {
        let cost = self.cost;
        let secret = secret.to_string();
        tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("bcrypt hash failed: {}", e),
            })
    }

    /// Verify a secret against a stored hash
    pub async fn verify(&self, secret: &str, hash: &str) -> DomainResult<bool> {
        let secret = secret.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("bcrypt verify failed: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        // Cost 10 keeps the test fast enough while staying above the floor
        let hasher = CredentialHasher::new(10).unwrap();

        let hash = hasher.hash("hunter22").await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("hunter22", &hash).await.unwrap());
        assert!(!hasher.verify("hunter23", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_cost_floor() {
        assert!(CredentialHasher::new(9).is_err());
        assert!(CredentialHasher::new(10).is_ok());
    }
}
