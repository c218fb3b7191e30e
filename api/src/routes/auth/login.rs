//! Handler for POST /api/auth/login

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::ApiError;

/// Check credentials and email a one-time login code
///
/// A session opens only after the code is verified. Unknown identifiers
/// and wrong passwords both answer 401 with the same message.
pub async fn login<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let issued = state
        .lifecycle
        .login(&request.identifier, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Verification code sent",
        "expires_at": issued.expires_at,
    })))
}
