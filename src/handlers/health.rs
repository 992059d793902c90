use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::services::get_metrics;

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "email-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /ready
///
/// The service is stateless; once it is serving it is ready.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

/// GET /metrics
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
