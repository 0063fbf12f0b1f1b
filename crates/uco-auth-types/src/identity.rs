//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uco_domain::contact::is_valid_email;

pub const USER_ID_HEADER: &str = "x-uco-user-id";
pub const USER_EMAIL_HEADER: &str = "x-uco-user-email";
pub const USER_PERMISSIONS_HEADER: &str = "x-uco-user-permissions";

/// Administrator identity injected by the gateway.
///
/// Returns 401 if `x-uco-user-id` is absent or blank. Email and permissions
/// are optional; permissions are a space-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: String,
    pub email: Option<String>,
    pub permissions: Vec<String>,
}

impl IdentityHeaders {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Address to notify about actions this administrator performed.
    ///
    /// Prefers the email header; falls back to the user id when the identity
    /// provider uses emails as subjects. `None` when neither is an email.
    pub fn contact_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|e| is_valid_email(e))
            .or_else(|| Some(self.user_id.as_str()).filter(|id| is_valid_email(id)))
    }
}

fn header_str(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = header_str(parts, USER_ID_HEADER);
        let email = header_str(parts, USER_EMAIL_HEADER);
        let permissions = header_str(parts, USER_PERMISSIONS_HEADER)
            .map(|s| s.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id,
                email,
                permissions,
            })
        }
    }
}
