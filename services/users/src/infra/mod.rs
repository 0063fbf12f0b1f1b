pub mod db;
pub mod notification;
pub mod parameters;
