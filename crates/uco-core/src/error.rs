use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body shared by every service: `{ kind, message, details? }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Build a JSON error response.
pub fn error_response(
    status: StatusCode,
    kind: &'static str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> Response {
    let body = ErrorBody {
        kind,
        message: message.into(),
        details,
    };
    (status, axum::Json(body)).into_response()
}

/// Common application error variants.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("bad gateway: {0}")]
    BadGateway(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::BadGateway(_) => "BAD_GATEWAY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only 5xx are logged here; TraceLayer already records every request.
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::BadGateway(e) => tracing::error!(error = %e, kind = "BAD_GATEWAY", "upstream error"),
            _ => {}
        }
        error_response(self.status(), self.kind(), self.to_string(), None)
    }
}
