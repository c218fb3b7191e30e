//! Handlers for the OAuth state issue and callback endpoints

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::OauthCallbackRequest;
use crate::handlers::ApiError;

/// GET /api/auth/oauth/state
///
/// Issue a short-lived CSRF state for the provider authorization
/// redirect. The frontend must send it back unchanged in the callback.
pub async fn issue_state<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError> {
    let value = state.lifecycle.issue_oauth_state().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "state": value,
    })))
}

/// POST /api/auth/oauth/callback
///
/// Exchange the provider's authorization code for a session. Answers
/// 401 on a missing or replayed state, 502 when the provider rejects
/// the code.
pub async fn callback<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    request: web::Json<OauthCallbackRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(ApiError::from_validation)?;

    let login = state
        .lifecycle
        .oauth_login(&request.code, &request.state, &state.oauth_redirect_uri)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "token": login.token,
        "account": login.account,
        "needs_company_type": login.needs_company_type,
    })))
}
