use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use serde::Serialize;

use crate::auth::AdminIdentity;
use crate::error::GatewayError;
use crate::proxy::{Forward, forward};
use crate::state::AppState;

// ── GET /api/admin/dashboard ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: &'static str,
    pub role: &'static str,
    pub section: &'static str,
}

pub async fn dashboard(identity: AdminIdentity) -> Json<DashboardResponse> {
    tracing::debug!(subject = identity.user_id(), "dashboard opened");
    Json(DashboardResponse {
        message: "Panel administrativo disponible.",
        role: "administrador",
        section: "dashboard",
    })
}

// ── ANY /api/admin/uco-challenge/api/v1/{*path} ──────────────────────────────

pub async fn proxy_admin(
    identity: AdminIdentity,
    State(state): State<AppState>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(
        &state,
        Forward {
            method,
            path: &path,
            query: uri.query(),
            headers: &headers,
            identity: Some(&identity),
            body,
        },
    )
    .await
}

// ── POST /api/public/users/verify-code ───────────────────────────────────────

pub async fn verify_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(
        &state,
        Forward {
            method: Method::POST,
            path: "users/verify-code",
            query: None,
            headers: &headers,
            identity: None,
            body,
        },
    )
    .await
}
