//! Liveness endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version
    pub version: String,
}

/// `GET /` — plain confirmation string, kept for existing clients.
pub async fn root() -> &'static str {
    "LabSafe server is running"
}

/// `GET /health` — JSON health envelope for probes and load balancers.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "labsafe-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
