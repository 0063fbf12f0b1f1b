use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use uco_core::error::error_response;
use uco_domain::contact::VerificationChannel;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Users service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum UsersServiceError {
    #[error("validation failed")]
    ValidationFailed(Vec<FieldError>),
    #[error("id type not found")]
    IdTypeNotFound,
    #[error("city not found")]
    CityNotFound,
    #[error("user already exists")]
    UserAlreadyExists { field: &'static str, value: String },
    #[error("user not found")]
    UserNotFound,
    #[error("unsupported verification channel: {0}")]
    InvalidChannel(String),
    #[error("user has no {0} to verify")]
    ContactNotAvailable(VerificationChannel),
    #[error("invalid verification code")]
    InvalidCode,
    #[error("verification code expired")]
    CodeExpired,
    #[error("notification delivery failed: {0}")]
    NotificationDeliveryFailed(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl UsersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::IdTypeNotFound => "ID_TYPE_NOT_FOUND",
            Self::CityNotFound => "CITY_NOT_FOUND",
            Self::UserAlreadyExists { .. } => "USER_ALREADY_EXISTS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidChannel(_) => "INVALID_CHANNEL",
            Self::ContactNotAvailable(_) => "CONTACT_NOT_AVAILABLE",
            Self::InvalidCode => "INVALID_CODE",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::NotificationDeliveryFailed(_) => "NOTIFICATION_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_)
            | Self::IdTypeNotFound
            | Self::CityNotFound
            | Self::InvalidChannel(_)
            | Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::UserAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::ContactNotAvailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CodeExpired => StatusCode::GONE,
            Self::NotificationDeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ValidationFailed(errors) => Some(json!(errors)),
            Self::UserAlreadyExists { field, value } => {
                Some(json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for UsersServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::NotificationDeliveryFailed(e) => {
                tracing::error!(error = %e, kind = "NOTIFICATION_DELIVERY_FAILED", "delivery error")
            }
            _ => {}
        }
        error_response(self.status(), self.kind(), self.to_string(), self.details())
    }
}
