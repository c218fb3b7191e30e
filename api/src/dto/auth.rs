//! Authentication request DTOs.
//!
//! DTO validation covers shape only (presence, length, email syntax);
//! the core services remain the authority on every business rule.

use serde::Deserialize;
use validator::Validate;

/// Request body for POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "company type is required"))]
    pub company_type: String,

    #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 50, message = "must be 2 to 50 characters"))]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 100, message = "must be 6 to 100 characters"))]
    pub password: String,

    #[validate(length(min = 6, max = 100, message = "must be 6 to 100 characters"))]
    pub confirm_password: String,
}

/// Request body for POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or display name
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request body for POST /api/auth/verify-code
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,

    #[validate(length(equal = 6, message = "must be a 6-digit code"))]
    pub code: String,
}

/// Request body for POST /api/auth/resend-code
#[derive(Debug, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,
}

/// Request body for POST /api/auth/forgot-password
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Request body for POST /api/auth/reset-password
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,

    #[validate(length(min = 6, max = 100, message = "must be 6 to 100 characters"))]
    pub password: String,

    #[validate(length(min = 6, max = 100, message = "must be 6 to 100 characters"))]
    pub confirm_password: String,
}

/// Request body for POST /api/auth/oauth/callback
#[derive(Debug, Deserialize, Validate)]
pub struct OauthCallbackRequest {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,

    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
}

/// Request body for POST /api/auth/complete-account
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteAccountRequest {
    #[validate(length(min = 1, message = "company type is required"))]
    pub company_type: String,
}

/// Query string for GET /api/auth/check-email
#[derive(Debug, Deserialize, Validate)]
pub struct CheckEmailQuery {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Query string for GET /api/auth/check-name
#[derive(Debug, Deserialize, Validate)]
pub struct CheckNameQuery {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}
