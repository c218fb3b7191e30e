//! Handler for POST /api/auth/verify-code

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::VerifyCodeRequest;
use crate::handlers::ApiError;

/// Confirm a one-time code and open a session
pub async fn verify_code<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let response = state
        .lifecycle
        .verify_code(&request.identifier, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "token": response.token,
        "account": response.account,
    })))
}
