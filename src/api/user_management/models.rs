use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use serde_json::Value;

use crate::service::users::{UserRole, UserStatus};
use crate::store::models::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
}

#[derive(Serialize, Debug)]
pub struct UserOut {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub status: String,
    pub role: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            id: user.id,
            username: user.username,
            email: user.email,
            status: user.status,
            role: user.role,
        }
    }
}

/// Body of `PATCH /users/update`.
#[derive(Deserialize, Debug)]
pub struct UsersUpdateBody {
    #[serde(default)]
    pub ids: Value,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Serialize, Debug)]
pub struct MessageOut {
    pub message: &'static str,
}
