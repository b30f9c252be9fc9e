//! Database layer: the `Datastore` seam and its Firestore and in-memory backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Reminder, ReminderFilter, ReminderPatch, User};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const REMINDERS: &str = "reminders";
}

/// Document store operations used by the API.
///
/// Implementations must be safe for concurrent use from many handlers.
#[async_trait]
pub trait Datastore: Send + Sync {
    // ─── Users ───────────────────────────────────────────────────

    /// First user whose name OR email matches, if any.
    async fn find_user_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// User with exactly this email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    // ─── Reminders ───────────────────────────────────────────────

    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), AppError>;

    async fn list_reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, AppError>;

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>, AppError>;

    /// Apply `patch` and return the post-update document, or None if absent.
    async fn update_reminder(
        &self,
        id: &str,
        patch: ReminderPatch,
    ) -> Result<Option<Reminder>, AppError>;

    /// Returns false if there was nothing to delete.
    async fn delete_reminder(&self, id: &str) -> Result<bool, AppError>;
}
