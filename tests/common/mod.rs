// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use medminder::db::{FirestoreDb, MemoryDb};
use medminder::error::AppError;
use medminder::routes::create_router;
use medminder::services::{Mailer, OutgoingMail};
use medminder::AppState;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Mailer that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: Mutex<HashSet<String>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Make sends to `address` fail.
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(&mail.to) {
            return Err(AppError::Mail(format!("refused recipient {}", mail.to)));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Create a test app over an in-memory store and a recording mailer.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = Arc::new(AppState::new(
        Arc::new(MemoryDb::new()),
        mailer.clone(),
    ));
    (create_router(state.clone()), state, mailer)
}

/// Create a test app whose store is offline: every database call fails.
#[allow(dead_code)]
pub fn create_offline_test_app() -> axum::Router {
    let state = Arc::new(AppState::new(
        Arc::new(FirestoreDb::new_mock()),
        Arc::new(RecordingMailer::default()),
    ));
    create_router(state)
}

/// Send one request and decode the JSON body (Null when empty).
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
