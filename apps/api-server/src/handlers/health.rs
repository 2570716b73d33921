//! Liveness and health endpoints.

use actix_web::{HttpResponse, web};
use inkwell_shared::MessageResponse;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// GET /
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Hello World"))
}

/// Health check endpoint - returns server status and the active store.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.posts.backend().as_str(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
