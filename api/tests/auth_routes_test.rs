//! Integration tests for the /api/auth routes
//!
//! Runs the real handlers against the core lifecycle service wired to
//! in-memory collaborators, asserting status codes and the
//! `{success, ...}` body shapes clients depend on.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use tp_api::routes::auth::{self, AppState};
use tp_core::repositories::MockAccountRepository;
use tp_core::services::auth::{AccountLifecycle, AccountLifecycleConfig};
use tp_core::services::credential::{CredentialHasher, MIN_BCRYPT_COST};
use tp_core::services::oauth::mock::{MockProvider, MockStateStore};
use tp_core::services::oauth::{ProviderClient, ProviderIdentity, StateStore};
use tp_core::services::token::{TokenSigner, TokenSignerConfig};
use tp_core::services::verification::mock::MockEmailNotifier;
use tp_core::services::verification::EmailNotifier;

struct Harness {
    state: web::Data<AppState<MockAccountRepository>>,
    notifier: Arc<MockEmailNotifier>,
    signer: Arc<TokenSigner>,
}

fn harness() -> Harness {
    let accounts = Arc::new(MockAccountRepository::new());
    let notifier = Arc::new(MockEmailNotifier::new());
    let hasher = Arc::new(CredentialHasher::new(MIN_BCRYPT_COST).unwrap());
    let signer = Arc::new(TokenSigner::new(TokenSignerConfig::default()).unwrap());
    let provider = Arc::new(MockProvider::returning(ProviderIdentity {
        email: "provider.user@example.com".to_string(),
        name: "Provider User".to_string(),
        subject: "provider-subject-1".to_string(),
    }));
    let states = Arc::new(MockStateStore::new());

    let lifecycle = AccountLifecycle::new(
        accounts,
        notifier.clone() as Arc<dyn EmailNotifier>,
        hasher,
        Arc::clone(&signer),
        provider as Arc<dyn ProviderClient>,
        states as Arc<dyn StateStore>,
        AccountLifecycleConfig::default(),
    );

    Harness {
        state: web::Data::new(AppState {
            lifecycle: Arc::new(lifecycle),
            oauth_redirect_uri: "http://localhost:3000/oauth/callback".to_string(),
        }),
        notifier,
        signer,
    }
}

/// Builds the test App the same way main.rs wires the real one
macro_rules! test_app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data($h.state.clone())
                .app_data(web::Data::from(Arc::clone(&$h.signer)))
                .configure(auth::configure::<MockAccountRepository>),
        )
        .await
    };
}

fn register_body() -> serde_json::Value {
    json!({
        "company_type": "sales",
        "name": "Alex",
        "last_name": "Smith",
        "email": "alex@example.com",
        "password": "secret1",
        "confirm_password": "secret1",
    })
}

#[actix_rt::test]
async fn register_creates_account_and_opens_session() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["account"]["email"], "alex@example.com");
    let token = body["token"].as_str().unwrap().to_string();

    // The returned token authenticates /me
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["account"]["name"], "Alex");
}

#[actix_rt::test]
async fn register_rejects_invalid_body_with_400() {
    let h = harness();
    let app = test_app!(h);

    let mut body = register_body();
    body["password"] = json!("short");
    body["confirm_password"] = json!("short");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[actix_rt::test]
async fn duplicate_email_maps_to_409() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let mut body = register_body();
    body["name"] = json!("Other");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn login_then_verify_code_opens_session() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "alex@example.com", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["expires_at"].as_str().is_some());

    // A wrong code is rejected before the real one works
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-code")
        .set_json(json!({"identifier": "alex@example.com", "code": "000000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let code = h.notifier.last_code().unwrap();
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-code")
        .set_json(json!({"identifier": "alex@example.com", "code": code}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(h.signer.verify(body["token"].as_str().unwrap()).is_ok());
}

#[actix_rt::test]
async fn wrong_password_maps_to_401() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "alex@example.com", "password": "wrong-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn code_delivery_failure_maps_to_502_with_generic_message() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    test::call_service(&app, req).await;

    h.notifier.set_failing(true);
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "alex@example.com", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Failed to send email, please try again later");
}

#[actix_rt::test]
async fn forgot_then_reset_password_round_trip() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    test::call_service(&app, req).await;

    // Unknown and known emails answer identically
    let generic = "If that email is registered, a reset link has been sent";
    for email in ["nobody@example.com", "alex@example.com"] {
        let req = test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(json!({"email": email}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], generic);
    }

    let raw = h.notifier.last_reset_token().unwrap();
    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({
            "token": raw,
            "password": "newpass9",
            "confirm_password": "newpass9",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Old password is gone, the new one logs in
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "alex@example.com", "password": "secret1"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "alex@example.com", "password": "newpass9"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn oauth_callback_and_account_completion() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::get()
        .uri("/api/auth/oauth/state")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let state = body["state"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/oauth/callback")
        .set_json(json!({"code": "provider-code", "state": state}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["needs_company_type"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/complete-account")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"company_type": "agency"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // A different company type afterwards conflicts
    let req = test::TestRequest::post()
        .uri("/api/auth/complete-account")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"company_type": "sales"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // A replayed state no longer authenticates
    let req = test::TestRequest::post()
        .uri("/api/auth/oauth/callback")
        .set_json(json!({"code": "provider-code", "state": state}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_rt::test]
async fn availability_checks_reflect_registrations() {
    let h = harness();
    let app = test_app!(h);

    let req = test::TestRequest::get()
        .uri("/api/auth/check-email?email=alex@example.com")
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["available"], true);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/check-email?email=alex@example.com")
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["available"], false);

    let req = test::TestRequest::get()
        .uri("/api/auth/check-name?name=Alex")
        .to_request();
    let body: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["available"], false);
}
