//! sea-orm entities for the users service tables.

pub mod cities;
pub mod countries;
pub mod departments;
pub mod id_types;
pub mod users;
pub mod verification_codes;
