//! reqwest client for the admin API behind the gateway.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use uco_domain::contact::VerificationChannel;

use crate::config::ConsoleConfig;
use crate::error::ClientError;
use crate::model::{City, Country, Dashboard, Department, IdType, NewUser, User, UsersPage};
use crate::shape::normalize_to_array;

/// Path of the users API as mounted on the gateway.
const ADMIN_API_PATH: &str = "/api/admin/uco-challenge/api/v1";
const DASHBOARD_PATH: &str = "/api/admin/dashboard";
const PUBLIC_VERIFY_PATH: &str = "/api/public/users/verify-code";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    /// Admin API root; every operation path is appended to it.
    base: Url,
    /// Gateway root, used for the dashboard and the public verification call.
    gateway: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(config.base_url.clone()))?;
        let mut gateway = base.clone();
        let root = base
            .path()
            .trim_end_matches('/')
            .strip_suffix(ADMIN_API_PATH)
            .unwrap_or_default()
            .to_owned();
        gateway.set_path(&root);
        gateway.set_query(None);

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base,
            gateway,
            token: config.access_token.clone(),
        })
    }

    /// Replace the bearer token, e.g. after a new login.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, root: &Url, segments: &[&str]) -> Url {
        let mut url = root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn api(&self, segments: &[&str]) -> Url {
        self.url(&self.base, segments)
    }

    fn gateway_path(&self, path: &str) -> Url {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.url(&self.gateway, &segments)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "admin api call failed");
        Err(ClientError::from_response(status.as_u16(), &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ClientError> {
        let value: serde_json::Value = self.fetch(self.http.get(url)).await?;
        normalize_to_array(value)
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ClientError::Decode(e.to_string())))
            .collect()
    }

    async fn post_empty(&self, url: Url, body: Option<&impl Serialize>) -> Result<(), ClientError> {
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await.map(|_| ())
    }

    // ── Operations ──────────────────────────────────────────────────────────

    pub async fn dashboard(&self) -> Result<Dashboard, ClientError> {
        self.fetch(self.http.get(self.gateway_path(DASHBOARD_PATH))).await
    }

    pub async fn list_users(&self, page: u32, size: u32) -> Result<UsersPage, ClientError> {
        let mut url = self.api(&["users"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        self.fetch(self.http.get(url)).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        self.fetch(self.http.post(self.api(&["users"])).json(user)).await
    }

    pub async fn send_code(
        &self,
        user_id: &str,
        channel: VerificationChannel,
    ) -> Result<(), ClientError> {
        let mut url = self.api(&["users", user_id, "send-code"]);
        url.query_pairs_mut().append_pair("channel", channel.as_str());
        self.post_empty(url, None::<&()>).await
    }

    pub async fn confirm_code(
        &self,
        user_id: &str,
        channel: VerificationChannel,
        code: &str,
    ) -> Result<(), ClientError> {
        let body = json!({ "channel": channel.as_str(), "code": code.trim() });
        self.post_empty(self.api(&["users", user_id, "confirm-code"]), Some(&body))
            .await
    }

    /// Public confirmation by contact; sent without the bearer token.
    pub async fn verify_code(&self, contact: &str, code: &str) -> Result<(), ClientError> {
        let body = json!({ "contact": contact.trim(), "code": code.trim() });
        let response = self
            .http
            .post(self.gateway_path(PUBLIC_VERIFY_PATH))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ClientError::from_response(status.as_u16(), &body))
    }

    pub async fn id_types(&self) -> Result<Vec<IdType>, ClientError> {
        self.fetch_list(self.api(&["idtypes"])).await
    }

    pub async fn countries(&self) -> Result<Vec<Country>, ClientError> {
        self.fetch_list(self.api(&["locations", "countries"])).await
    }

    pub async fn departments(&self, country_id: &str) -> Result<Vec<Department>, ClientError> {
        self.fetch_list(self.api(&["locations", "countries", country_id, "departments"]))
            .await
    }

    pub async fn cities(&self, department_id: &str) -> Result<Vec<City>, ClientError> {
        self.fetch_list(self.api(&["locations", "departments", department_id, "cities"]))
            .await
    }
}
