//! Application assembly helpers shared by main and tests

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// CORS policy allowing the configured frontend origin
pub fn cors(frontend_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(frontend_url)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Register non-auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
