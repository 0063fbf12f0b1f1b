use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Handler for `GET /healthz`: liveness check.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /readyz`: readiness check for services without
/// dependencies worth probing.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Map a dependency probe result to a readiness status.
pub fn readiness<E: std::fmt::Display>(probe: Result<(), E>) -> StatusCode {
    match probe {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
