//! Authentication route handlers
//!
//! Endpoints under `/api/auth`:
//! - registration and login with one-time-code step-up
//! - password reset (forgot / reset)
//! - Google OAuth state issue and callback
//! - account completion and profile for authenticated sessions
//! - email / display-name availability checks
//!
//! Rate limiting for these endpoints belongs to the deployment's edge
//! proxy; nothing here throttles.

pub mod availability;
pub mod complete_account;
pub mod forgot_password;
pub mod login;
pub mod me;
pub mod oauth;
pub mod register;
pub mod resend_code;
pub mod reset_password;
pub mod verify_code;

use actix_web::web;
use std::sync::Arc;

use tp_core::repositories::AccountRepository;
use tp_core::services::auth::AccountLifecycle;

/// Shared application state holding the lifecycle service
pub struct AppState<U: AccountRepository> {
    pub lifecycle: Arc<AccountLifecycle<U>>,
    /// Redirect URI registered with the OAuth provider
    pub oauth_redirect_uri: String,
}

/// Register the `/api/auth` scope
pub fn configure<U: AccountRepository + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register::register::<U>))
            .route("/login", web::post().to(login::login::<U>))
            .route("/verify-code", web::post().to(verify_code::verify_code::<U>))
            .route("/resend-code", web::post().to(resend_code::resend_code::<U>))
            .route(
                "/forgot-password",
                web::post().to(forgot_password::forgot_password::<U>),
            )
            .route(
                "/reset-password",
                web::post().to(reset_password::reset_password::<U>),
            )
            .route("/oauth/state", web::get().to(oauth::issue_state::<U>))
            .route("/oauth/callback", web::post().to(oauth::callback::<U>))
            .route(
                "/complete-account",
                web::post().to(complete_account::complete_account::<U>),
            )
            .route("/me", web::get().to(me::me::<U>))
            .route("/check-email", web::get().to(availability::check_email::<U>))
            .route("/check-name", web::get().to(availability::check_name::<U>)),
    );
}
