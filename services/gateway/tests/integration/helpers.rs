use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use axum_test::TestServer;
use serde_json::{Map, Value, json};

use uco_auth_types::token::{JwtClaims, TokenSettings, sign_access_token};
use uco_gateway::router::build_router;
use uco_gateway::state::AppState;

pub const SECRET: &str = "gateway-integration-secret";
pub const ISSUER: &str = "https://uco-challenge.us.auth0.com/";
pub const AUDIENCE: &str = "https://uco-challenge/api";
pub const SUBJECT: &str = "auth0|6650f1c2a1";
pub const EMAIL: &str = "admin@uco.edu.co";

pub fn settings() -> TokenSettings {
    TokenSettings {
        secret: SECRET.to_owned(),
        issuer: ISSUER.to_owned(),
        audience: AUDIENCE.to_owned(),
    }
}

pub fn claims(permissions: &[&str]) -> JwtClaims {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 3600;
    JwtClaims {
        sub: SUBJECT.to_owned(),
        email: Some(EMAIL.to_owned()),
        permissions: Some(permissions.iter().map(|p| (*p).to_owned()).collect()),
        scope: None,
        iss: ISSUER.to_owned(),
        aud: AUDIENCE.to_owned(),
        exp,
    }
}

pub fn sign(claims: &JwtClaims) -> String {
    sign_access_token(claims, SECRET).unwrap()
}

pub fn admin_token() -> String {
    sign(&claims(&["admin", "read:users"]))
}

/// Echoes what the gateway forwarded. Paths ending in `/missing` answer 404.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    if uri.path().ends_with("/missing") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "kind": "USER_NOT_FOUND", "message": "user not found" })),
        )
            .into_response();
    }
    let identity: Map<String, Value> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-uco-"))
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::from(value.to_str().unwrap_or_default()),
            )
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "identity": identity,
        "body": serde_json::from_slice::<Value>(&body).ok(),
    }))
    .into_response()
}

/// Bind an echo upstream on an ephemeral port and return its root URL.
pub async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(echo))
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

pub fn gateway(upstream: &str) -> TestServer {
    let state = AppState::new(settings(), upstream, Duration::from_secs(5)).unwrap();
    TestServer::new(build_router(state)).unwrap()
}

pub async fn gateway_with_upstream() -> TestServer {
    let upstream = spawn_upstream().await;
    gateway(&upstream)
}
