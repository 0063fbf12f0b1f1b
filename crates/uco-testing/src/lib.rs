//! Test utilities for UCO services.
//!
//! Provides `MockAuth` identity headers and the JSON fixture loader.
//! Use from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod fixture;
