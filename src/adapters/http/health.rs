//! Liveness endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::HEALTH_PATH;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "reseller-billing",
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

pub fn health_router() -> Router {
    Router::new().route(HEALTH_PATH, get(health))
}
