use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

use uco_auth_types::token::TokenSettings;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenSettings>,
    pub client: reqwest::Client,
    /// Root URL of the users service.
    pub upstream: Url,
}

impl AppState {
    pub fn new(tokens: TokenSettings, upstream: &str, timeout: Duration) -> anyhow::Result<Self> {
        let upstream = Url::parse(upstream).context("invalid users service URL")?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build upstream client")?;
        Ok(Self {
            tokens: Arc::new(tokens),
            client,
            upstream,
        })
    }
}
