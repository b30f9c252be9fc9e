// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminder model, creation/patch payloads and list filters.

use serde::{Deserialize, Serialize};

/// Medication reminder stored in the `reminders` collection.
///
/// Optional fields that were never set serialize as `null`; `caregivers`
/// is always an array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Generated UUID (also used as document ID)
    pub id: String,
    /// Owner of the reminder. Not required to match a registered user.
    pub user_email: String,
    pub medication_name: Option<String>,
    /// Opaque schedule descriptor, compared by string equality only
    pub time: Option<String>,
    pub frequency: Option<String>,
    /// Caregiver email addresses, in the order given
    #[serde(default)]
    pub caregivers: Vec<String>,
}

/// Whether `id` has the shape of a generated reminder id.
///
/// Anything else cannot name a stored reminder and is treated as not found.
pub fn is_valid_id(id: &str) -> bool {
    uuid::Uuid::try_parse(id).is_ok()
}

/// Body of `POST /api/reminders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub caregivers: Option<Vec<String>>,
}

impl NewReminder {
    /// Build the stored reminder under a freshly generated id.
    ///
    /// Returns None when `userEmail` is missing or empty.
    pub fn into_reminder(self) -> Option<Reminder> {
        let user_email = self.user_email.filter(|email| !email.is_empty())?;
        Some(Reminder {
            id: uuid::Uuid::new_v4().to_string(),
            user_email,
            medication_name: self.medication_name,
            time: self.time,
            frequency: self.frequency,
            caregivers: self.caregivers.unwrap_or_default(),
        })
    }
}

/// Body of `PUT /api/reminders/:id`. Only the fields present are replaced.
///
/// The optional reminder fields distinguish an absent key (keep the stored
/// value) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub medication_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub time: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub frequency: Option<Option<String>>,
    #[serde(default)]
    pub caregivers: Option<Vec<String>>,
}

/// Wrap any value that appears in the body, `null` included, in `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ReminderPatch {
    /// Apply the patch in place. The id is never touched.
    pub fn apply_to(self, reminder: &mut Reminder) {
        if let Some(user_email) = self.user_email {
            reminder.user_email = user_email;
        }
        if let Some(name) = self.medication_name {
            reminder.medication_name = name;
        }
        if let Some(time) = self.time {
            reminder.time = time;
        }
        if let Some(frequency) = self.frequency {
            reminder.frequency = frequency;
        }
        if let Some(caregivers) = self.caregivers {
            reminder.caregivers = caregivers;
        }
    }
}

/// Which reminders `list` returns.
///
/// The query string may carry both `time` and `email`; `time` is checked
/// first and `email` is then ignored. This is a choice, not a conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderFilter {
    All,
    Time(String),
    UserEmail(String),
}

impl ReminderFilter {
    /// Pick the filter from raw query values. Empty strings count as absent.
    pub fn from_query(time: Option<String>, email: Option<String>) -> Self {
        match (
            time.filter(|t| !t.is_empty()),
            email.filter(|e| !e.is_empty()),
        ) {
            (Some(time), _) => ReminderFilter::Time(time),
            (None, Some(email)) => ReminderFilter::UserEmail(email),
            (None, None) => ReminderFilter::All,
        }
    }

    /// Whether a reminder passes this filter.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self {
            ReminderFilter::All => true,
            ReminderFilter::Time(time) => reminder.time.as_deref() == Some(time.as_str()),
            ReminderFilter::UserEmail(email) => reminder.user_email == *email,
        }
    }
}
