//! Root aggregate persisted as a single JSON blob.
//!
//! # Invariants
//! - `version == CURRENT_VERSION` for every aggregate returned by the store.
//! - Seed data is fixed: three complaints, no reminders, one festival notice.

use super::complaint::{Complaint, ComplaintCategory, ComplaintStatus};
use super::notice::{Notice, NoticeKind};
use super::reminder::Reminder;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageData {
    /// Most recently created first.
    #[serde(default)]
    pub complaints: Vec<Complaint>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub notices: Vec<Notice>,
    pub version: u32,
}

impl StorageData {
    /// Empty aggregate stamped with the current version.
    pub fn empty() -> Self {
        Self {
            complaints: Vec::new(),
            reminders: Vec::new(),
            notices: Vec::new(),
            version: CURRENT_VERSION,
        }
    }

    /// First-run aggregate with example complaints and a safety notice.
    pub fn seeded() -> Self {
        Self {
            complaints: vec![
                Complaint {
                    id: "complaint-1".to_string(),
                    category: ComplaintCategory::Water,
                    description: "Water supply has been irregular for the past week in our locality. We are getting water only for 2 hours in the morning.".to_string(),
                    location: "Sector 12, Dwarka, New Delhi".to_string(),
                    image: None,
                    status: ComplaintStatus::InReview,
                    created_at: utc(2025, 1, 10, 10, 30),
                    updated_at: utc(2025, 1, 12, 14, 20),
                },
                Complaint {
                    id: "complaint-2".to_string(),
                    category: ComplaintCategory::Road,
                    description: "Large pothole on the main road causing traffic issues and accidents. Urgent repair needed.".to_string(),
                    location: "MG Road, Bangalore".to_string(),
                    image: None,
                    status: ComplaintStatus::Submitted,
                    created_at: utc(2025, 1, 11, 16, 45),
                    updated_at: utc(2025, 1, 11, 16, 45),
                },
                Complaint {
                    id: "complaint-3".to_string(),
                    category: ComplaintCategory::Garbage,
                    description: "Garbage collection has been missed for 3 days. Waste is piling up and creating hygiene issues.".to_string(),
                    location: "Andheri West, Mumbai".to_string(),
                    image: None,
                    status: ComplaintStatus::Resolved,
                    created_at: utc(2025, 1, 8, 9, 15),
                    updated_at: utc(2025, 1, 13, 11, 30),
                },
            ],
            reminders: Vec::new(),
            notices: vec![Notice {
                id: "notice-1".to_string(),
                title: "Festival Safety Guidelines".to_string(),
                message: "Please follow safety protocols during festival celebrations. Avoid crowded places and maintain social distancing.".to_string(),
                kind: NoticeKind::Festival,
                date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
                is_active: true,
            }],
            version: CURRENT_VERSION,
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
