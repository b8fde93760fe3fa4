//! Service banner and liveness probe.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /.
#[derive(Debug, Serialize)]
pub struct ServiceBanner {
    pub service: &'static str,
    pub status: &'static str,
    /// Path of the liveness probe.
    pub health: &'static str,
}

/// Response for GET /healthz.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET / - Describe the service.
async fn root() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        service: "Reading Notes Backend API",
        status: "ok",
        health: "/healthz",
    })
}

/// GET /healthz - Liveness probe. Does not touch the database.
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
}
