// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caregiver notification.
//!
//! `notify` validates the reminder, then launches one background task per
//! caregiver and returns without waiting for them. Each task resolves the
//! caregiver to a registered user and sends one email. Outcomes are logged,
//! never reported back to the caller.
//!
//! Tasks run on a `TaskTracker` so shutdown can wait for in-flight sends.

use crate::db::Datastore;
use crate::error::{AppError, Result};
use crate::models::reminder::is_valid_id;
use crate::models::Reminder;
use crate::services::mail::{Mailer, OutgoingMail};
use std::sync::Arc;
use tokio_util::task::TaskTracker;

pub const SUBJECT: &str = "Medication Reminder";

/// Acknowledgement returned once all dispatch tasks are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationResult {
    /// Number of caregiver tasks spawned (one per input email, duplicates included)
    pub dispatched: usize,
}

/// Text body for a reminder notification.
///
/// A reminder without a medication name still sends, with `undefined` in
/// its place.
pub fn reminder_message(reminder: &Reminder) -> String {
    format!(
        "Time to take {}.",
        reminder.medication_name.as_deref().unwrap_or("undefined")
    )
}

pub struct Notifier {
    db: Arc<dyn Datastore>,
    mailer: Arc<dyn Mailer>,
    tracker: TaskTracker,
}

impl Notifier {
    pub fn new(db: Arc<dyn Datastore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            mailer,
            tracker: TaskTracker::new(),
        }
    }

    /// Notify each caregiver about a reminder.
    pub async fn notify(
        &self,
        reminder_id: &str,
        caregivers: Vec<String>,
    ) -> Result<NotificationResult> {
        if !is_valid_id(reminder_id) {
            return Err(AppError::reminder_not_found());
        }
        let reminder = self
            .db
            .get_reminder(reminder_id)
            .await?
            .ok_or_else(AppError::reminder_not_found)?;

        let message = reminder_message(&reminder);
        let dispatched = caregivers.len();

        for caregiver in caregivers {
            let db = Arc::clone(&self.db);
            let mailer = Arc::clone(&self.mailer);
            let body = message.clone();
            let reminder_id = reminder.id.clone();

            self.tracker.spawn(async move {
                let user = match db.find_user_by_email(&caregiver).await {
                    Ok(Some(user)) => user,
                    Ok(None) => {
                        tracing::debug!(%reminder_id, %caregiver, "Caregiver not registered, skipping");
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(%reminder_id, %caregiver, error = %e, "Caregiver lookup failed");
                        return;
                    }
                };

                let mail = OutgoingMail {
                    to: user.email,
                    subject: SUBJECT.to_string(),
                    body,
                };
                match mailer.send(&mail).await {
                    Ok(()) => tracing::info!(%reminder_id, to = %mail.to, "Email sent to caregiver"),
                    Err(e) => {
                        tracing::warn!(%reminder_id, to = %mail.to, error = %e, "Failed to send email to caregiver")
                    }
                }
            });
        }

        tracing::info!(reminder_id, dispatched, "Caregiver notifications dispatched");
        Ok(NotificationResult { dispatched })
    }

    /// Wait for every task launched so far, then accept new ones again.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Stop for good: wait for in-flight sends before the process exits.
    pub async fn shutdown(&self) {
        self.tracker.close();
        tracing::info!(in_flight = self.tracker.len(), "Waiting for notification tasks");
        self.tracker.wait().await;
    }
}
