//! Bearer-token extractor for protected endpoints.
//!
//! Handlers that take an `AuthContext` parameter only run for requests
//! carrying a valid `Authorization: Bearer <token>` header. Expired and
//! otherwise-invalid tokens get distinct messages so clients know when
//! to re-authenticate.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, error::ErrorUnauthorized, web, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use tp_core::errors::{DomainError, TokenError};
use tp_core::services::token::TokenSigner;

/// Authenticated account context extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account id from the token's subject claim
    pub account_id: Uuid,
    /// Token id for tracing
    pub jti: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let signer = req
                .app_data::<web::Data<TokenSigner>>()
                .ok_or_else(|| ErrorUnauthorized("Authentication is not configured"))?;

            let token = bearer_token(req)
                .ok_or_else(|| ErrorUnauthorized("Missing or invalid Authorization header"))?;

            let claims = signer.verify(token).map_err(|e| match e {
                DomainError::Token(TokenError::Expired) => {
                    ErrorUnauthorized("Session expired, please log in again")
                }
                _ => ErrorUnauthorized("Invalid session token"),
            })?;

            let account_id = claims
                .account_id()
                .map_err(|_| ErrorUnauthorized("Invalid session token"))?;

            Ok(AuthContext {
                account_id,
                jti: claims.jti,
            })
        })();

        ready(result)
    }
}
