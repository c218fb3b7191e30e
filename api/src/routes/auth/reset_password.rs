//! Handler for POST /api/auth/reset-password

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::ApiError;

/// Consume a reset token and set a new password
pub async fn reset_password<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    state
        .lifecycle
        .reset_password(&request.token, &request.password, &request.confirm_password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Password has been reset",
    })))
}
