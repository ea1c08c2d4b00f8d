pub mod attendance;
pub mod auth;
pub mod event;
pub mod unit;
pub mod user;
