//! Auth types shared across UCO services.
//!
//! Provides bearer-token validation for the gateway and the `IdentityHeaders`
//! extractor for services behind it.

pub mod identity;
pub mod token;
