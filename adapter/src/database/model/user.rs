use std::str::FromStr;

use kernel::model::{
    id::UserId,
    role::Role,
    user::{CoOrganizer, User},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub role_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            full_name,
            email,
            role_name,
        } = value;
        let role = Role::from_str(&role_name).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown role name: {role_name}"))
        })?;
        Ok(User {
            id: user_id,
            user_name,
            full_name,
            email,
            role,
        })
    }
}

// Only used to check a login or a password change.
#[derive(FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}

#[derive(FromRow)]
pub struct CoOrganizerRow {
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
}

impl From<CoOrganizerRow> for CoOrganizer {
    fn from(value: CoOrganizerRow) -> Self {
        let CoOrganizerRow {
            user_id,
            user_name,
            full_name,
        } = value;
        CoOrganizer {
            user_id,
            user_name,
            full_name,
        }
    }
}
