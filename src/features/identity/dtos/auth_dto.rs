use serde::{Deserialize, Serialize};

use crate::features::identity::models::User;

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Login outcome. Authentication failures are a response, not an error;
/// only infrastructure problems surface as `Err` from the service.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponseDto {
    pub success: bool,
    pub error_message: Option<String>,
    pub user: Option<UserInfoDto>,
}

impl LoginResponseDto {
    pub fn succeeded(user: UserInfoDto) -> Self {
        Self {
            success: true,
            error_message: None,
            user: Some(user),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            user: None,
        }
    }
}

/// User information exposed to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoDto {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl From<User> for UserInfoDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            roles: user.roles,
        }
    }
}
