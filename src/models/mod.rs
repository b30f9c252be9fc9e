// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod reminder;
pub mod user;

pub use reminder::{NewReminder, Reminder, ReminderFilter, ReminderPatch};
pub use user::{NewUser, User, UserResponse};
