// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder CRUD and caregiver notification routes.

use crate::error::{AppError, Result, ResultExt};
use crate::models::reminder::is_valid_id;
use crate::models::{NewReminder, Reminder, ReminderFilter, ReminderPatch};
use crate::routes::{AppJson, AppQuery};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/api/reminders/notify",
            post(notify_caregivers)
                .get(notify_as_id)
                .put(notify_as_id)
                .delete(notify_as_id),
        )
        .route(
            "/api/reminders/{id}",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
}

// ─── CRUD ────────────────────────────────────────────────────

async fn create_reminder(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NewReminder>,
) -> Result<(StatusCode, Json<Reminder>)> {
    let reminder = body
        .into_reminder()
        .ok_or_else(|| AppError::BadRequest("userEmail is required".to_string()))?;

    state
        .db
        .insert_reminder(&reminder)
        .await
        .or_fail("Failed to create a reminder")?;

    tracing::info!(reminder_id = %reminder.id, "Reminder created");
    Ok((StatusCode::CREATED, Json(reminder)))
}

#[derive(Deserialize)]
struct ListQuery {
    time: Option<String>,
    email: Option<String>,
}

/// List reminders. `time` wins over `email` when both are given.
async fn list_reminders(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<ListQuery>,
) -> Result<Json<Vec<Reminder>>> {
    let filter = ReminderFilter::from_query(params.time, params.email);
    let reminders = state
        .db
        .list_reminders(&filter)
        .await
        .or_fail("Failed to retrieve reminders")?;
    Ok(Json(reminders))
}

/// "notify" is not a reminder id; other methods on that path get the
/// same 404 as any malformed id.
async fn notify_as_id() -> AppError {
    AppError::reminder_not_found()
}

async fn get_reminder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>> {
    if !is_valid_id(&id) {
        return Err(AppError::reminder_not_found());
    }
    state
        .db
        .get_reminder(&id)
        .await
        .or_fail("Failed to find the reminder")?
        .map(Json)
        .ok_or_else(AppError::reminder_not_found)
}

async fn update_reminder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<ReminderPatch>,
) -> Result<Json<Reminder>> {
    if !is_valid_id(&id) {
        return Err(AppError::reminder_not_found());
    }
    state
        .db
        .update_reminder(&id, patch)
        .await
        .or_fail("Failed to update the reminder")?
        .map(Json)
        .ok_or_else(AppError::reminder_not_found)
}

async fn delete_reminder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !is_valid_id(&id) {
        return Err(AppError::reminder_not_found());
    }
    let deleted = state
        .db
        .delete_reminder(&id)
        .await
        .or_fail("Failed to delete the reminder")?;

    if deleted {
        tracing::info!(reminder_id = %id, "Reminder deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::reminder_not_found())
    }
}

// ─── Notification ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotifyRequest {
    #[serde(default)]
    reminder_id: String,
    #[serde(default)]
    caregivers: Vec<String>,
}

#[derive(Serialize)]
pub struct NotifyResponse {
    pub message: String,
}

/// Email each caregiver about a reminder. Responds before any mail is delivered.
async fn notify_caregivers(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<NotifyRequest>,
) -> Result<Json<NotifyResponse>> {
    state
        .notifier
        .notify(&body.reminder_id, body.caregivers)
        .await
        .or_fail("Failed to send notifications")?;

    Ok(Json(NotifyResponse {
        message: "Notifications sent to caregivers".to_string(),
    }))
}
