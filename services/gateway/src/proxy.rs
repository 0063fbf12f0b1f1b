//! Forwarding of admin and public calls to the users service.

use anyhow::anyhow;
use axum::body::Bytes;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method};
use axum::response::{IntoResponse, Response};
use reqwest::Url;

use uco_auth_types::identity::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_PERMISSIONS_HEADER};
use uco_core::middleware::REQUEST_ID_HEADER;

use crate::auth::AdminIdentity;
use crate::error::GatewayError;
use crate::state::AppState;

/// Path prefix of the users service API.
const USERS_API_PREFIX: [&str; 3] = ["uco-challenge", "api", "v1"];

/// Request headers copied to the upstream call.
const FORWARDED_HEADERS: [HeaderName; 3] = [CONTENT_TYPE, ACCEPT, REQUEST_ID_HEADER];

/// A call to relay upstream. `path` is relative to the users API prefix.
pub struct Forward<'a> {
    pub method: Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub headers: &'a HeaderMap,
    pub identity: Option<&'a AdminIdentity>,
    pub body: Bytes,
}

pub fn upstream_url(base: &Url, path: &str, query: Option<&str>) -> Result<Url, GatewayError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| GatewayError::Internal(anyhow!("users service URL cannot be a base")))?;
        segments
            .pop_if_empty()
            .extend(USERS_API_PREFIX)
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Send `call` to the users service and relay its status, content type and body.
pub async fn forward(state: &AppState, call: Forward<'_>) -> Result<Response, GatewayError> {
    let url = upstream_url(&state.upstream, call.path, call.query)?;
    let mut request = state.client.request(call.method.clone(), url);

    for name in FORWARDED_HEADERS {
        if let Some(value) = call.headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }
    if let Some(identity) = call.identity {
        request = request
            .header(USER_ID_HEADER, identity.user_id())
            .header(USER_PERMISSIONS_HEADER, identity.permissions());
        if let Some(email) = identity.email() {
            request = request.header(USER_EMAIL_HEADER, email);
        }
    }
    if !call.body.is_empty() {
        request = request.body(call.body);
    }

    let upstream = request.send().await.map_err(|e| {
        if e.is_builder() {
            GatewayError::Internal(anyhow!(e).context("failed to build upstream request"))
        } else {
            GatewayError::UpstreamUnavailable(e.to_string())
        }
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let body = upstream
        .bytes()
        .await
        .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

    tracing::debug!(method = %call.method, path = call.path, %status, "forwarded");

    let mut response = (status, body).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}
