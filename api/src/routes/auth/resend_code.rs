//! Handler for POST /api/auth/resend-code

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::ResendCodeRequest;
use crate::handlers::ApiError;

/// Issue a fresh one-time code for a pending login
pub async fn resend_code<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<ResendCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let issued = state.lifecycle.resend_code(&request.identifier).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Verification code sent",
        "expires_at": issued.expires_at,
    })))
}
