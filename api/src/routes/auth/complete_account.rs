//! Handler for POST /api/auth/complete-account

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::CompleteAccountRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Set the company type on the authenticated account
///
/// Intended for accounts created through the OAuth callback; answers
/// 409 once a different company type is already set.
pub async fn complete_account<U: AccountRepository + 'static>(
    auth: AuthContext,
    state: web::Data<AppState<U>>,
    request: web::Json<CompleteAccountRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let profile = state
        .lifecycle
        .complete_account(auth.account_id, &request.company_type)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Account completed",
        "account": profile,
    })))
}
