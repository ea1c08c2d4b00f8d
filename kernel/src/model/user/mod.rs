use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_organizer(&self) -> bool {
        self.role == Role::Organizer
    }
}

/// An organizer enrolled on an event in addition to its creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoOrganizer {
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
}
