//! Bearer access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issue", test))]
use serde::Serialize;

/// Verification parameters for access tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject: String,
    pub email: Option<String>,
    pub permissions: Vec<String>,
    pub exp: u64,
}

impl TokenInfo {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("unexpected issuer")]
    InvalidIssuer,
    #[error("unexpected audience")]
    InvalidAudience,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload.
///
/// | Claim | Meaning |
/// |-------|---------|
/// | `sub` | caller id at the identity provider |
/// | `email` | optional caller email |
/// | `permissions` | array of granted permissions |
/// | `scope` | space-separated fallback when `permissions` is absent |
/// | `exp` | expiration, seconds since epoch |
///
/// `iss` and `aud` are checked by the validator.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issue", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub iss: String,
    pub aud: String,
    pub exp: u64,
}

impl JwtClaims {
    fn granted(&self) -> Vec<String> {
        match &self.permissions {
            Some(p) if !p.is_empty() => p.clone(),
            _ => self
                .scope
                .as_deref()
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
        }
    }
}

fn decode_jwt(token: &str, settings: &TokenSettings) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the caller identity.
pub fn validate_access_token(token: &str, settings: &TokenSettings) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, settings)?;
    if claims.sub.trim().is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(TokenInfo {
        permissions: claims.granted(),
        subject: claims.sub,
        email: claims.email,
        exp: claims.exp,
    })
}

/// Sign claims with the shared secret.
#[cfg(any(feature = "issue", test))]
pub fn sign_access_token(claims: &JwtClaims, secret: &str) -> Result<String, AuthError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Malformed)
}
