//! Handler for POST /api/auth/register

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::ApiError;

/// Create a password-backed account and open a session
///
/// Returns 201 with `{success, token, account}` on success; 409 when the
/// email or display name is already taken.
pub async fn register<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let response = state
        .lifecycle
        .register(
            &request.company_type,
            &request.name,
            &request.last_name,
            &request.email,
            &request.password,
            &request.confirm_password,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Account created",
        "token": response.token,
        "account": response.account,
    })))
}
