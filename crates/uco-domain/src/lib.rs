//! Domain types shared across all UCO services and the admin console.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod contact;
pub mod id;
pub mod pagination;
pub mod user;
