//! User directory: registration with uniqueness checks, lookup by email.

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHasher, SaltString};
use std::sync::Arc;

pub const DUPLICATE_USER: &str = "Username or email is already in use";

pub struct UserDirectory {
    db: Arc<dyn Datastore>,
}

impl UserDirectory {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }

    /// Register a new user.
    ///
    /// Fails with `Conflict` if any user already has the same name or the
    /// same email. The check-then-insert is not transactional, so two
    /// simultaneous registrations for one name can both succeed.
    pub async fn register(&self, request: NewUser) -> Result<User> {
        let (Some(name), Some(email)) = (
            request.name.filter(|n| !n.is_empty()),
            request.email.filter(|e| !e.is_empty()),
        ) else {
            return Err(AppError::BadRequest(
                "Name and email are required".to_string(),
            ));
        };

        if self
            .db
            .find_user_by_name_or_email(&name, &email)
            .await?
            .is_some()
        {
            tracing::info!(%email, "Registration rejected: duplicate name or email");
            return Err(AppError::Conflict(DUPLICATE_USER.to_string()));
        }

        let password_hash = match request.password {
            Some(password) => Some(
                tokio::task::spawn_blocking(move || hash_password(&password))
                    .await
                    .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))??,
            ),
            None => None,
        };

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
        };
        self.db.insert_user(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// The user with exactly this email, or None.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.db.find_user_by_email(email).await
    }
}

/// Hash a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}
