//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-uco-user-*` headers injected by the
//! gateway. In tests, `MockAuth` produces these headers directly so no gateway
//! or JWT is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uco_auth_types::identity::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_PERMISSIONS_HEADER};

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: String,
    pub email: Option<String>,
    pub permissions: Vec<String>,
}

impl MockAuth {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            permissions: Vec::new(),
        }
    }

    /// An administrator identified by email with the `admin` permission.
    pub fn admin(email: &str) -> Self {
        Self {
            user_id: email.to_owned(),
            email: Some(email.to_owned()),
            permissions: vec!["admin".to_owned()],
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_owned());
        self
    }

    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions = permissions.iter().map(|p| (*p).to_owned()).collect();
        self
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id).unwrap(),
        );
        if let Some(email) = &self.email {
            map.insert(
                HeaderName::from_static(USER_EMAIL_HEADER),
                HeaderValue::from_str(email).unwrap(),
            );
        }
        if !self.permissions.is_empty() {
            map.insert(
                HeaderName::from_static(USER_PERMISSIONS_HEADER),
                HeaderValue::from_str(&self.permissions.join(" ")).unwrap(),
            );
        }
        map
    }
}
