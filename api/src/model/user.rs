use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::UpdateUserPassword, CoOrganizer, User},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, VariantNames)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoleName {
    Organizer,
    Student,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Organizer => Self::Organizer,
            Role::Student => Self::Student,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(value: Vec<User>) -> Self {
        Self {
            items: value.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub role: RoleName,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            user_name,
            full_name,
            email,
            role,
        } = value;
        Self {
            id,
            user_name,
            full_name,
            email,
            role: RoleName::from(role),
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPasswordRequest {
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 6))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateUserPasswordRequestWithUserId(UserId, UpdateUserPasswordRequest);

impl From<UpdateUserPasswordRequestWithUserId> for UpdateUserPassword {
    fn from(value: UpdateUserPasswordRequestWithUserId) -> Self {
        let UpdateUserPasswordRequestWithUserId(
            user_id,
            UpdateUserPasswordRequest {
                current_password,
                new_password,
            },
        ) = value;
        UpdateUserPassword {
            user_id,
            current_password,
            new_password,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoOrganizerResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
}

impl From<CoOrganizer> for CoOrganizerResponse {
    fn from(value: CoOrganizer) -> Self {
        let CoOrganizer {
            user_id,
            user_name,
            full_name,
        } = value;
        Self {
            user_id,
            user_name,
            full_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoOrganizersResponse {
    pub items: Vec<CoOrganizerResponse>,
}

impl From<Vec<CoOrganizer>> for CoOrganizersResponse {
    fn from(value: Vec<CoOrganizer>) -> Self {
        Self {
            items: value.into_iter().map(CoOrganizerResponse::from).collect(),
        }
    }
}
