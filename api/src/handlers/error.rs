//! Mapping from domain errors to HTTP responses.
//!
//! Clients always receive `{"success": false, "message": "..."}`.
//! Internal detail (database messages, configuration problems) is logged
//! and replaced with a generic message before it leaves the process.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use tp_core::errors::{AuthError, DomainError, ErrorResponse, TokenError};

/// Error type returned by every route handler
#[derive(Error, Debug)]
pub enum ApiError {
    /// Domain-level failure, mapped by variant
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Request rejected before reaching the domain (DTO validation)
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Collapse validator's per-field errors into one client message
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => format!("{}: {}", field, m),
                    None => format!("{}: invalid value", field),
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiError::BadRequest(message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) => match e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::Auth(auth) => match auth {
                    AuthError::AccountNotFound => StatusCode::NOT_FOUND,
                    AuthError::AlreadyCompleted => StatusCode::CONFLICT,
                    _ => StatusCode::UNAUTHORIZED,
                },
                DomainError::Token(token) => match token {
                    TokenError::Expired | TokenError::Invalid => StatusCode::UNAUTHORIZED,
                    TokenError::GenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
                },
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict { .. } => StatusCode::CONFLICT,
                DomainError::Notification { .. } | DomainError::Provider { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Domain(e) => match e {
                DomainError::Configuration { .. } | DomainError::Internal { .. } => {
                    tracing::error!(error = %e, event = "internal_error", "Request failed");
                    "Internal server error".to_string()
                }
                DomainError::Notification { .. } => {
                    tracing::error!(error = %e, event = "notification_error", "Request failed");
                    "Failed to send email, please try again later".to_string()
                }
                DomainError::Provider { .. } => {
                    tracing::error!(error = %e, event = "provider_error", "Request failed");
                    "Authentication provider is unavailable".to_string()
                }
                other => other.to_string(),
            },
        };

        HttpResponse::build(status).json(ErrorResponse::new(message))
    }
}
