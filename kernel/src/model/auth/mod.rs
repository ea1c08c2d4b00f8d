pub mod event;

/// Opaque bearer token identifying one login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
