//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token management,
//! and validation operations. The actual HTTP status mapping and response wording
//! live in the presentation layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent the various ways an authentication flow can fail.
/// Credential failures are deliberately undifferentiated: a wrong password,
/// an unknown email and an unknown login name all surface as
/// [`AuthError::InvalidCredentials`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("OAuth state mismatch")]
    CsrfMismatch,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account already completed")]
    AlreadyCompleted,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("Pattern mismatch: {field}")]
    PatternMismatch { field: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid company type")]
    InvalidCompanyType,
}

/// Serializable error body returned at the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
