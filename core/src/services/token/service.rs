//! Session token signing and verification

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::claims::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenSignerConfig;

/// Signs and verifies HS256 session tokens
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    session_expiry_days: i64,
}

impl TokenSigner {
    /// Creates a new token signer
    ///
    /// # Returns
    ///
    /// A new `TokenSigner`, or `DomainError::Configuration` when the
    /// secret is empty.
    pub fn new(config: TokenSignerConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            session_expiry_days: config.session_expiry_days,
        })
    }

    /// Issues a session token for an account
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed JWT
    /// * `Err(TokenError::GenerationFailed)` - Signing failed
    pub fn issue(&self, account_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new_session(account_id, self.session_expiry_days);
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies a session token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is expired, malformed or signed wrongly
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    tracing::debug!("token_rejected: expired");
                    DomainError::Token(TokenError::Expired)
                } else {
                    tracing::debug!(kind = ?e.kind(), "token_rejected: invalid");
                    DomainError::Token(TokenError::Invalid)
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(TokenSignerConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let signer = signer();
        let account_id = Uuid::new_v4();

        let token = signer.issue(account_id).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.account_id().unwrap(), account_id);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenSigner::new(TokenSignerConfig {
            jwt_secret: "  ".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = signer();
        let err = signer.verify("not-a-jwt").unwrap_err();
        assert_eq!(err, DomainError::Token(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer_a = signer();
        let signer_b = TokenSigner::new(TokenSignerConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..Default::default()
        })
        .unwrap();

        let token = signer_a.issue(Uuid::new_v4()).unwrap();
        let err = signer_b.verify(&token).unwrap_err();
        assert_eq!(err, DomainError::Token(TokenError::Invalid));
    }
}
