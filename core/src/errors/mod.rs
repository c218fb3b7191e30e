//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{AuthError, ErrorResponse, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Duplicate value: {field}")]
    Conflict { field: String },

    #[error("Notification delivery failed: {message}")]
    Notification { message: String },

    #[error("Identity provider error: {message}")]
    Provider { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
