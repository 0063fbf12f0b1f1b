use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::sync::watch;

use uco_admin_console::client::ApiClient;
use uco_admin_console::config::ConsoleConfig;
use uco_admin_console::poll::PollState;

pub const TOKEN: &str = "console-test-token";

/// What the fake gateway serves and what it saw.
#[derive(Default)]
pub struct Gateway {
    pub countries: Vec<Value>,
    pub departments: HashMap<String, Vec<Value>>,
    pub failing: bool,
    /// Held before answering the countries call.
    pub countries_delay: Option<Duration>,
    pub country_calls: usize,
    pub department_calls: usize,
    pub user_calls: usize,
    pub sent_codes: Vec<(String, String)>,
    pub public_had_auth: Option<bool>,
}

pub type Shared = Arc<Mutex<Gateway>>;

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "kind": "UNAUTHORIZED", "message": "missing bearer token" })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn dashboard() -> Json<Value> {
    Json(json!({
        "message": "Panel administrativo disponible.",
        "role": "administrador",
        "section": "dashboard"
    }))
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "kind": "INTERNAL", "message": "internal server error" })),
    )
        .into_response()
}

async fn id_types(State(gw): State<Shared>) -> Response {
    if gw.lock().unwrap().failing {
        return internal_error();
    }
    Json(json!({ "content": [{ "id": "cc", "name": "Cédula de ciudadanía" }] })).into_response()
}

async fn countries(State(gw): State<Shared>) -> Response {
    let delay = {
        let mut gw = gw.lock().unwrap();
        gw.country_calls += 1;
        gw.countries_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let gw = gw.lock().unwrap();
    if gw.failing {
        return internal_error();
    }
    Json(Value::Array(gw.countries.clone())).into_response()
}

async fn departments(State(gw): State<Shared>, Path(country): Path<String>) -> Json<Value> {
    let mut gw = gw.lock().unwrap();
    gw.department_calls += 1;
    Json(Value::Array(
        gw.departments.get(&country).cloned().unwrap_or_default(),
    ))
}

async fn cities() -> Json<Value> {
    Json(json!([]))
}

async fn list_users(
    State(gw): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (calls, failing) = {
        let mut gw = gw.lock().unwrap();
        gw.user_calls += 1;
        (gw.user_calls, gw.failing)
    };
    if failing {
        return internal_error();
    }
    let page: u32 = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(0);
    let size: u32 = query.get("size").and_then(|v| v.parse().ok()).unwrap_or(10);
    Json(json!({
        "users": [{
            "id": format!("user-{calls}"),
            "firstName": "Ana",
            "lastName": "Gómez",
            "email": "ana@uco.edu.co",
            "documentNumber": "1020304050",
            "mobileNumber": null,
            "emailConfirmed": true,
            "mobileNumberConfirmed": false
        }],
        "page": page,
        "size": size,
        "totalElements": 1
    }))
    .into_response()
}

async fn create_user(Json(body): Json<Value>) -> Response {
    if body["email"] == "dup@uco.edu.co" {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "kind": "USER_ALREADY_EXISTS",
                "message": "El usuario ya existe.",
                "details": { "field": "email", "value": "dup@uco.edu.co" }
            })),
        )
            .into_response();
    }
    let mut user = body.clone();
    user["id"] = json!("0199a0c4-0000-7000-8000-000000000001");
    user["emailConfirmed"] = json!(false);
    user["mobileNumberConfirmed"] = json!(false);
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn send_code(
    State(gw): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let channel = query.get("channel").cloned().unwrap_or_default();
    gw.lock().unwrap().sent_codes.push((id, channel));
    StatusCode::ACCEPTED
}

async fn confirm_code(Json(body): Json<Value>) -> Response {
    if body["code"] != "123456" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "kind": "INVALID_CODE", "message": "El código no es válido." })),
        )
            .into_response();
    }
    Json(json!({ "confirmed": true })).into_response()
}

async fn verify_public(State(gw): State<Shared>, headers: HeaderMap) -> Json<Value> {
    gw.lock().unwrap().public_had_auth = Some(headers.contains_key(AUTHORIZATION));
    Json(json!({ "confirmed": true }))
}

fn router(gw: Shared) -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}/send-code", post(send_code))
        .route("/users/{id}/confirm-code", post(confirm_code))
        .route("/idtypes", get(id_types))
        .route("/locations/countries", get(countries))
        .route("/locations/countries/{id}/departments", get(departments))
        .route("/locations/departments/{id}/cities", get(cities));
    let admin = Router::new()
        .route("/dashboard", get(dashboard))
        .nest("/uco-challenge/api/v1", api)
        .route_layer(middleware::from_fn(require_token));
    Router::new()
        .nest("/api/admin", admin)
        .route("/api/public/users/verify-code", post(verify_public))
        .with_state(gw)
}

/// Start a fake gateway and return a client pointed at it.
pub async fn spawn_gateway(gateway: Gateway) -> (ApiClient, Shared) {
    let shared: Shared = Arc::new(Mutex::new(gateway));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::clone(&shared));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = ConsoleConfig {
        base_url: format!("http://{addr}/api/admin/uco-challenge/api/v1"),
        access_token: Some(TOKEN.to_owned()),
        poll_interval: None,
    };
    (ApiClient::new(&config).unwrap(), shared)
}

pub fn country(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

/// Wait until `predicate` holds for the poll state, failing after 5 seconds.
pub async fn wait_for<T: Clone>(
    rx: &mut watch::Receiver<PollState<T>>,
    predicate: impl FnMut(&PollState<T>) -> bool,
) -> PollState<T> {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("poll state did not settle")
        .expect("poller stopped")
        .clone()
}
