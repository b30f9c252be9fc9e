//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User record stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated UUID (also used as document ID)
    pub id: String,
    /// Display name, unique across users
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// Argon2 PHC string; None if the user registered without a password
    #[serde(default)]
    pub password_hash: Option<String>,
}

/// Registration request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
