use uco_core::config::{optional, parse_or, required};

/// Address alerted about duplicate registrations when the parameters
/// catalog does not provide one.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@uco.edu.co";

/// Users service configuration loaded from environment variables.
#[derive(Debug)]
pub struct UsersConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL for the parameters cache.
    pub redis_url: String,
    /// TCP port for the HTTP server (default 8083). Env var: `USERS_PORT`.
    pub users_port: u16,
    /// Notification provider root URL. Env var: `NOTIFICATION_API_URL`.
    pub notification_api_url: String,
    /// Notification provider API key. Env var: `NOTIFICATION_API_KEY`.
    pub notification_api_key: String,
    /// Parameters service root URL. Env var: `PARAMETERS_SERVICE_URL`.
    pub parameters_service_url: String,
    /// Fallback administrator address. Env var: `ADMIN_EMAIL`.
    pub admin_email: String,
    /// Outbound HTTP timeout in seconds (default 10). Env var: `HTTP_TIMEOUT_SECS`.
    pub http_timeout_secs: u64,
}

impl UsersConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            redis_url: required("REDIS_URL"),
            users_port: parse_or("USERS_PORT", 8083),
            notification_api_url: required("NOTIFICATION_API_URL"),
            notification_api_key: required("NOTIFICATION_API_KEY"),
            parameters_service_url: required("PARAMETERS_SERVICE_URL"),
            admin_email: optional("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned()),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", 10),
        }
    }
}
