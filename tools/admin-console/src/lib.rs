//! REST client and polling watchers for the UCO administration API.
//!
//! Everything goes through the gateway: [`client::ApiClient`] wraps the admin
//! endpoints, [`poll::Poller`] keeps a value fresh in the background and the
//! `catalog`/`users` modules build pollers for each screen of the console.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod poll;
pub mod shape;
pub mod users;
