//! Bearer token extraction for the admin routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use uco_auth_types::token::{TokenInfo, validate_access_token};
use uco_domain::user::Permission;

use crate::error::GatewayError;
use crate::state::AppState;

/// A caller holding a valid token with the `admin` permission.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub TokenInfo);

impl AdminIdentity {
    pub fn user_id(&self) -> &str {
        &self.0.subject
    }

    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }

    /// Space-separated, as the users service expects.
    pub fn permissions(&self) -> String {
        self.0.permissions.join(" ")
    }
}

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| GatewayError::MissingToken)?;

        let info = validate_access_token(bearer.token(), &state.tokens)?;
        if !info.has_permission(Permission::ADMIN) {
            tracing::info!(subject = %info.subject, "admin permission missing");
            return Err(GatewayError::Forbidden);
        }
        Ok(Self(info))
    }
}
