// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MedMinder: medication reminders with caregiver email notifications
//!
//! This crate provides the backend API for registering users, storing
//! medication reminders, and emailing caregivers when a reminder fires.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use db::Datastore;
use services::{Notifier, UserDirectory};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub db: Arc<dyn Datastore>,
    pub users: UserDirectory,
    pub notifier: Notifier,
}

impl AppState {
    /// Wire the services over one store and one mailer.
    pub fn new(db: Arc<dyn Datastore>, mailer: Arc<dyn services::Mailer>) -> Self {
        Self {
            users: UserDirectory::new(Arc::clone(&db)),
            notifier: Notifier::new(Arc::clone(&db), mailer),
            db,
        }
    }
}
