//! Runtime parameters: an HTTP catalog client fronted by a Redis cache.

use std::time::Duration;

use anyhow::Context as _;
use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::repository::ParameterPort;
use crate::error::UsersServiceError;

/// Seconds a fetched parameter stays in Redis.
pub const PARAMETER_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Deserialize)]
struct ParameterDto {
    value: Option<String>,
}

/// Reads `GET {base}/parameters/{key}` from the parameters service.
#[derive(Clone)]
pub struct HttpParametersClient {
    client: Client,
    base: Url,
}

impl HttpParametersClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn url_for(&self, key: &str) -> anyhow::Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("parameters base url cannot hold a path"))?
            .pop_if_empty()
            .push("parameters")
            .push(key);
        Ok(url)
    }
}

impl ParameterPort for HttpParametersClient {
    async fn get(&self, key: &str) -> Result<Option<String>, UsersServiceError> {
        let url = self.url_for(key)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("request parameter")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto: ParameterDto = response
            .error_for_status()
            .context("parameters service status")?
            .json()
            .await
            .context("decode parameter")?;
        Ok(dto.value)
    }
}

fn cache_key(key: &str) -> String {
    format!("uco:parameter:{key}")
}

/// Read-through Redis cache in front of another [`ParameterPort`].
///
/// Redis failures degrade to direct reads.
#[derive(Clone)]
pub struct CachedParameters<P: ParameterPort> {
    pub inner: P,
    pub pool: Pool,
}

impl<P: ParameterPort> CachedParameters<P> {
    async fn cached(&self, key: &str) -> Result<Option<String>, UsersServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| UsersServiceError::Internal(e.into()))?;
        let value: Option<String> = conn
            .get(cache_key(key))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| UsersServiceError::Internal(e.into()))?;
        Ok(value)
    }

    async fn store(&self, key: &str, value: &str) -> Result<(), UsersServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| UsersServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(cache_key(key), value, PARAMETER_CACHE_TTL_SECS)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| UsersServiceError::Internal(e.into()))?;
        Ok(())
    }
}

impl<P: ParameterPort> ParameterPort for CachedParameters<P> {
    async fn get(&self, key: &str) -> Result<Option<String>, UsersServiceError> {
        match self.cached(key).await {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {}
            Err(e) => tracing::warn!(key, error = ?e, "parameter cache unavailable"),
        }
        let value = self.inner.get(key).await?;
        if let Some(v) = &value {
            if let Err(e) = self.store(key, v).await {
                tracing::warn!(key, error = ?e, "parameter not cached");
            }
        }
        Ok(value)
    }
}
