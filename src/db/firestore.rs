// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the `Datastore` operations over two collections:
//! - Users (registered people, looked up by email)
//! - Reminders (medication reminder documents keyed by UUID)

use crate::db::{collections, Datastore};
use crate::error::AppError;
use crate::models::{Reminder, ReminderFilter, ReminderPatch, User};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator accepts any bearer token; hand it a static unsigned JWT.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn db_err(e: firestore::errors::FirestoreError) -> AppError {
        AppError::Database(e.to_string())
    }
}

#[async_trait]
impl Datastore for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn find_user_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_any([q.field("name").eq(name), q.field("email").eq(email)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(Self::db_err)?;
        Ok(users.into_iter().next())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.field("email").eq(email))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(Self::db_err)?;
        Ok(users.into_iter().next())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(Self::db_err)?;

        tracing::debug!(user_id = %user.id, "User stored");
        Ok(())
    }

    // ─── Reminder Operations ─────────────────────────────────────

    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::REMINDERS)
            .document_id(&reminder.id)
            .object(reminder)
            .execute()
            .await
            .map_err(Self::db_err)?;
        Ok(())
    }

    async fn list_reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::REMINDERS);

        let reminders = match filter {
            ReminderFilter::All => query.obj::<Reminder>().query().await,
            ReminderFilter::Time(time) => {
                query
                    .filter(|q| q.field("time").eq(time.as_str()))
                    .obj::<Reminder>()
                    .query()
                    .await
            }
            ReminderFilter::UserEmail(email) => {
                query
                    .filter(|q| q.field("userEmail").eq(email.as_str()))
                    .obj::<Reminder>()
                    .query()
                    .await
            }
        };

        reminders.map_err(Self::db_err)
    }

    async fn get_reminder(&self, id: &str) -> Result<Option<Reminder>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::REMINDERS)
            .obj()
            .one(id)
            .await
            .map_err(Self::db_err)
    }

    async fn update_reminder(
        &self,
        id: &str,
        patch: ReminderPatch,
    ) -> Result<Option<Reminder>, AppError> {
        // Fetch-modify-write; concurrent updates to one id are last-write-wins.
        let Some(mut reminder) = self.get_reminder(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut reminder);
        self.insert_reminder(&reminder).await?;
        Ok(Some(reminder))
    }

    async fn delete_reminder(&self, id: &str) -> Result<bool, AppError> {
        // Firestore deletes are idempotent, so check existence first to report 404.
        if self.get_reminder(id).await?.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::REMINDERS)
            .document_id(id)
            .execute()
            .await
            .map_err(Self::db_err)?;

        tracing::debug!(reminder_id = id, "Reminder deleted");
        Ok(true)
    }
}
