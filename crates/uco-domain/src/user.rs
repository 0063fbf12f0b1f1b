//! User-related constants and text helpers.

/// Permission names carried in access tokens.
pub struct Permission;

impl Permission {
    pub const READ_USERS: &'static str = "read:users";
    pub const WRITE_USERS: &'static str = "write:users";
    pub const ADMIN: &'static str = "admin";
}

/// Maximum length of a first/second name or surname.
pub const MAX_NAME_LEN: usize = 40;

/// Trim an optional text field, mapping blank values to `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Letters (any script) and single spaces between words.
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty()
        && value.chars().count() <= MAX_NAME_LEN
        && value.chars().all(|c| c.is_alphabetic() || c == ' ')
}

/// Identification numbers are 4 to 20 ASCII alphanumerics.
pub fn is_valid_id_number(value: &str) -> bool {
    (4..=20).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_alphanumeric())
}
