pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod proxy;
pub mod router;
pub mod state;
