use std::time::Duration;

use uco_core::config::{optional, parse_or};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/admin/uco-challenge/api/v1";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Admin API root, without trailing slash. Env var: `UCO_API_BASE_URL`.
    pub base_url: String,
    /// Bearer token for the gateway. Env var: `UCO_ACCESS_TOKEN`.
    pub access_token: Option<String>,
    /// `None` disables interval polling. Env var: `UCO_POLL_INTERVAL_MS` (0 disables).
    pub poll_interval: Option<Duration>,
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: normalize_base_url(
                optional("UCO_API_BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL),
            ),
            access_token: optional("UCO_ACCESS_TOKEN"),
            poll_interval: poll_interval(parse_or("UCO_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            access_token: None,
            poll_interval: poll_interval(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn poll_interval(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
