use strum::{AsRefStr, EnumString};

/// Closed set of roles a user can hold. Stored by name in `roles.name`.
#[derive(Debug, Clone, Copy, EnumString, AsRefStr, PartialEq, Eq)]
pub enum Role {
    Organizer,
    Student,
}
