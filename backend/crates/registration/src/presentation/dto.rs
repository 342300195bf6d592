//! Data Transfer Objects
//!
//! Request/response bodies for the registration API. Request fields are
//! `Option` so a missing or explicit-null field is distinguishable from
//! an empty string and validated with the right message.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

/// Sign up request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct GenericResponse {
    pub message: String,
}

impl GenericResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User profile response. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub image: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            image: user.image,
        }
    }
}
