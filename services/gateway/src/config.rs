use uco_core::config::{parse_or, required};

/// Gateway configuration loaded from environment variables.
#[derive(Debug)]
pub struct GatewayConfig {
    /// TCP port for the HTTP server (default 8080). Env var: `GATEWAY_PORT`.
    pub gateway_port: u16,
    /// HS256 signing secret shared with the identity provider.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Root URL of the users service. Env var: `USERS_SERVICE_URL`.
    pub users_service_url: String,
    /// Upstream timeout in seconds (default 15). Env var: `UPSTREAM_TIMEOUT_SECS`.
    pub upstream_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            gateway_port: parse_or("GATEWAY_PORT", 8080),
            jwt_secret: required("JWT_SECRET"),
            jwt_issuer: required("JWT_ISSUER"),
            jwt_audience: required("JWT_AUDIENCE"),
            users_service_url: required("USERS_SERVICE_URL"),
            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", 15),
        }
    }
}
