use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use uco_core::error::AppError;
use uco_core::health::{healthz, readiness};
use uco_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    catalog::{list_cities, list_countries, list_departments, list_id_types},
    user::{list_users, register_user},
    verification::{confirm_code, send_code, verify_code},
};
use crate::state::AppState;

/// Mount point of the public API.
pub const BASE_PATH: &str = "/uco-challenge/api/v1";

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping().await)
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Users (admin)
        .route("/users", post(register_user).get(list_users))
        .route("/users/{id}/send-code", post(send_code))
        .route("/users/{id}/confirm-code", post(confirm_code))
        // Verification (public)
        .route("/users/verify-code", post(verify_code))
        // Catalogs
        .route("/idtypes", get(list_id_types))
        .route("/locations/countries", get(list_countries))
        .route(
            "/locations/countries/{country_id}/departments",
            get(list_departments),
        )
        .route(
            "/locations/departments/{department_id}/cities",
            get(list_cities),
        );

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest(BASE_PATH, api)
        .fallback(|| async { AppError::NotFound })
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
