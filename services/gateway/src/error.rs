use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use uco_auth_types::token::AuthError;
use uco_core::error::error_response;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] AuthError),
    #[error("administrator permission required")]
    Forbidden,
    #[error("users service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, "internal error"),
            Self::UpstreamUnavailable(cause) => tracing::warn!(%cause, "upstream unavailable"),
            _ => {}
        }
        // The upstream cause stays in the logs.
        let message = match &self {
            Self::UpstreamUnavailable(_) => "users service unavailable".to_owned(),
            other => other.to_string(),
        };
        error_response(self.status(), self.kind(), message, None)
    }
}
