use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::claims::Claims;
use super::repo::User;

/// Request body for signup. Every field is optional at the wire level so
/// the validator, not the deserializer, decides which message the client
/// gets for a missing field.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmationPassword")]
    pub confirmation_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client; never carries the hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: u16,
    pub message: String,
    #[serde(rename = "userInfo")]
    pub user_info: UserInfo,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: u16,
    pub message: String,
}

/// Response for GET /auth: the verified claims, as-is.
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub status: u16,
    pub data: Claims,
}
