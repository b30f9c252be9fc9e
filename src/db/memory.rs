//! In-process `Datastore` backed by concurrent maps.
//!
//! Used for offline development (`DATASTORE=memory`) and by the test suite.
//! Listing order is unspecified, as with the real store.

use crate::db::Datastore;
use crate::error::AppError;
use crate::models::{Reminder, ReminderFilter, ReminderPatch, User};
use async_trait::async_trait;
use dashmap::DashMap;

/// Document store kept entirely in memory.
#[derive(Default)]
pub struct MemoryDb {
    users: DashMap<String, User>,
    reminders: DashMap<String, Reminder>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Datastore for MemoryDb {
    async fn find_user_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.name == name || entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), AppError> {
        self.reminders.insert(reminder.id.clone(), reminder.clone());
        Ok(())
    }

    async fn list_reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, AppError> {
        Ok(self
            .reminders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>, AppError> {
        Ok(self.reminders.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_reminder(
        &self,
        id: &str,
        patch: ReminderPatch,
    ) -> Result<Option<Reminder>, AppError> {
        // get_mut holds the shard lock, so the patch applies atomically here.
        Ok(self.reminders.get_mut(id).map(|mut entry| {
            patch.apply_to(entry.value_mut());
            entry.value().clone()
        }))
    }

    async fn delete_reminder(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.reminders.remove(id).is_some())
    }
}
