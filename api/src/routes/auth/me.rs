//! Handler for GET /api/auth/me

use actix_web::{web, HttpResponse};
use serde_json::json;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Return the authenticated account's public profile
pub async fn me<U: AccountRepository + 'static>(
    auth: AuthContext,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.lifecycle.profile(auth.account_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "account": profile,
    })))
}
