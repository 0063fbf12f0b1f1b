//! Contact channels and the text rules for emails, mobile numbers and
//! verification codes.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Length of a verification code.
pub const CODE_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static CO_MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3\d{9}$").expect("mobile regex"));
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{7,15}$").expect("e164 regex"));

/// Where a verification code is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationChannel {
    Email,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported verification channel: {0}")]
pub struct UnknownChannel(pub String);

impl VerificationChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for VerificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationChannel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "mobile" => Ok(Self::Mobile),
            _ => Err(UnknownChannel(s.trim().to_owned())),
        }
    }
}

/// Canonical form used to store and look up codes for a contact.
pub fn normalize_contact(channel: VerificationChannel, raw: &str) -> String {
    match channel {
        VerificationChannel::Email => raw.trim().to_lowercase(),
        VerificationChannel::Mobile => raw.trim().to_owned(),
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Ten digits starting with 3.
pub fn is_valid_co_mobile(value: &str) -> bool {
    CO_MOBILE_RE.is_match(value)
}

/// `+` followed by 7 to 15 digits.
pub fn is_e164(value: &str) -> bool {
    E164_RE.is_match(value)
}

/// Convert a Colombian mobile number into E.164 for SMS delivery.
pub fn to_e164(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('+') {
        return trimmed.to_owned();
    }
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 && digits.starts_with("57") {
        return format!("+{digits}");
    }
    if digits.len() == 10 && digits.starts_with('3') {
        return format!("+57{digits}");
    }
    format!("+{digits}")
}

pub fn is_valid_code(value: &str) -> bool {
    value.len() == CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Guess the channel of a free-form contact: emails contain `@`, everything
/// else is treated as a phone number.
pub fn channel_of(contact: &str) -> VerificationChannel {
    if contact.contains('@') {
        VerificationChannel::Email
    } else {
        VerificationChannel::Mobile
    }
}
