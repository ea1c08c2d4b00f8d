pub mod access;
pub mod attendance;
pub mod auth;
pub mod event;
pub mod id;
pub mod role;
pub mod unit;
pub mod user;
