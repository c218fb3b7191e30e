//! Handler for POST /api/auth/forgot-password

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::ForgotPasswordRequest;
use crate::handlers::ApiError;

/// Start a password reset
///
/// The response never reveals whether the email maps to an account.
pub async fn forgot_password<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    state.lifecycle.forgot_password(&request.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "If that email is registered, a reset link has been sent",
    })))
}
