use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{admin_token, claims, gateway_with_upstream, sign};

#[tokio::test]
async fn should_report_health_without_token() {
    let server = gateway_with_upstream().await;

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn should_open_dashboard_for_admin() {
    let server = gateway_with_upstream().await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(admin_token())
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Panel administrativo disponible.");
    assert_eq!(body["role"], "administrador");
    assert_eq!(body["section"], "dashboard");
}

#[tokio::test]
async fn should_reject_missing_token() {
    let server = gateway_with_upstream().await;

    let response = server.get("/api/admin/dashboard").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let server = gateway_with_upstream().await;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_foreign_audience() {
    let server = gateway_with_upstream().await;
    let mut foreign = claims(&["admin"]);
    foreign.aud = "https://another-api".to_owned();

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(sign(&foreign))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_expired_token() {
    let server = gateway_with_upstream().await;
    let mut expired = claims(&["admin"]);
    expired.exp = 1_000_000;

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(sign(&expired))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_token_without_admin_permission() {
    let server = gateway_with_upstream().await;

    let response = server
        .get("/api/admin/uco-challenge/api/v1/users")
        .authorization_bearer(sign(&claims(&["read:users"])))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_accept_admin_granted_through_scope() {
    let server = gateway_with_upstream().await;
    let mut scoped = claims(&[]);
    scoped.permissions = None;
    scoped.scope = Some("openid admin".to_owned());

    let response = server
        .get("/api/admin/dashboard")
        .authorization_bearer(sign(&scoped))
        .await;

    response.assert_status_ok();
}
