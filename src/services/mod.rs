// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod mail;
pub mod notifier;
pub mod users;

pub use mail::{Mailer, OutgoingMail, SmtpMailer};
pub use notifier::{NotificationResult, Notifier};
pub use users::UserDirectory;
