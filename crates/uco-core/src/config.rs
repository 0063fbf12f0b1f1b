//! Environment lookups used by the `from_env()` constructors of each service.
//!
//! Required values panic at start-up with the variable name so a misconfigured
//! deployment fails before binding a port.

use std::str::FromStr;

/// Read a required variable.
///
/// # Panics
///
/// Panics if the variable is missing.
pub fn required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

/// Read an optional variable, treating blank values as absent.
pub fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, falling back to `default` when absent.
///
/// # Panics
///
/// Panics if the variable is present but cannot be parsed.
pub fn parse_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
{
    match optional(name) {
        Some(v) => v
            .parse()
            .unwrap_or_else(|_| panic!("{name} has an invalid value: {v}")),
        None => default,
    }
}
