//! Informational endpoints.

use axum::Json;
use serde::Serialize;

/// GET /
///
/// Fixed pointer at the gated endpoint.
pub async fn index() -> &'static str {
    "Use the /code endpoint with an x-api-key header to view the command source.\n"
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is answering.
    pub status: &'static str,
}

/// GET /v1/health
///
/// Intentionally unauthenticated, for load balancer and k8s probes.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
