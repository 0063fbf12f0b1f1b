use serde_json::Value;

/// Failures of an admin API call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The session is missing or expired; the caller should log in again.
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("api error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        code: Option<String>,
        message: Option<String>,
        field: Option<String>,
        value: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

const GENERIC_MESSAGE: &str = "Ocurrió un error inesperado. Inténtalo de nuevo.";

fn text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Readable name of a duplicated field.
fn readable_field(field: &str) -> &str {
    match field {
        "identification" | "idNumber" => "número de documento",
        "phone" | "mobileNumber" => "número de teléfono",
        "email" => "correo",
        other => other,
    }
}

impl ClientError {
    /// Build an error from a non-success status and the raw response body.
    ///
    /// Understands `{ kind|code, userMessage|message, details: { field, value } }`,
    /// optionally wrapped once under `data`.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match status {
            401 => return Self::Unauthorized,
            403 => return Self::Forbidden,
            _ => {}
        }
        let parsed: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let body = match parsed.get("data") {
            Some(inner) if inner.is_object() => inner,
            _ => &parsed,
        };
        let details = body.get("details").filter(|d| d.is_object());
        Self::Api {
            status,
            code: text(body, "code").or_else(|| text(body, "kind")),
            message: text(body, "userMessage").or_else(|| text(body, "message")),
            field: details.and_then(|d| text(d, "field")),
            value: details.and_then(|d| text(d, "value")),
        }
    }

    /// Text to show an operator.
    pub fn friendly_message(&self) -> String {
        match self {
            Self::Unauthorized => "Tu sesión expiró. Inicia sesión de nuevo.".to_owned(),
            Self::Forbidden => "No tienes permisos de administrador para esta acción.".to_owned(),
            Self::Api {
                message,
                field,
                value,
                ..
            } => {
                let base = message.as_deref().unwrap_or(GENERIC_MESSAGE);
                match (field, value) {
                    (Some(field), Some(value)) => {
                        format!("{base} ({} duplicado: {value})", readable_field(field))
                    }
                    _ => base.to_owned(),
                }
            }
            Self::Transport(_) => {
                "No fue posible contactar el servidor. Revisa tu conexión e inténtalo de nuevo."
                    .to_owned()
            }
            Self::Decode(_) => GENERIC_MESSAGE.to_owned(),
            Self::InvalidBaseUrl(url) => {
                format!("La dirección del servidor no es válida: {url}")
            }
        }
    }

    /// Whether the operator must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
