//! Festival reminder record.
//!
//! # Invariants
//! - `festival_name` and `festival_date` are copies taken at creation and are
//!   not re-synced with the catalog.
//! - At most one reminder per `festival_id` when created through
//!   `LocalStore::toggle_reminder`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub festival_id: String,
    pub festival_name: String,
    pub festival_date: NaiveDate,
    /// Absent in records written before the flag existed.
    #[serde(default = "super::active_by_default")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub festival_id: String,
    pub festival_name: String,
    pub festival_date: NaiveDate,
    pub is_active: bool,
}

impl Reminder {
    pub fn from_new(new: NewReminder, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            festival_id: new.festival_id,
            festival_name: new.festival_name,
            festival_date: new.festival_date,
            is_active: new.is_active,
            created_at: now,
        }
    }
}
