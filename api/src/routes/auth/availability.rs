//! Handlers for the email and display-name availability checks

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use tp_core::repositories::AccountRepository;

use super::AppState;
use crate::dto::auth::{CheckEmailQuery, CheckNameQuery};
use crate::handlers::ApiError;

/// GET /api/auth/check-email?email=...
pub async fn check_email<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    query: web::Query<CheckEmailQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate().map_err(ApiError::from_validation)?;

    let available = state.lifecycle.is_email_available(&query.email).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "available": available,
    })))
}

/// GET /api/auth/check-name?name=...
pub async fn check_name<U: AccountRepository + 'static>(
    state: web::Data<AppState<U>>,
    query: web::Query<CheckNameQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate().map_err(ApiError::from_validation)?;

    let available = state.lifecycle.is_name_available(&query.name).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "available": available,
    })))
}
