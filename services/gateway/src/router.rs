use axum::{
    Router,
    routing::{any, get, post},
};
use tower_http::trace::TraceLayer;

use uco_core::error::AppError;
use uco_core::health::{healthz, readyz};
use uco_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{dashboard, proxy_admin, verify_code};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Admin
        .route("/api/admin/dashboard", get(dashboard))
        .route("/api/admin/uco-challenge/api/v1/{*path}", any(proxy_admin))
        // Public
        .route("/api/public/users/verify-code", post(verify_code))
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
