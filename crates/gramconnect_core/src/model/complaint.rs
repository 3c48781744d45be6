//! Complaint record and its enums.
//!
//! # Invariants
//! - `created_at` never changes after creation.
//! - `updated_at` is refreshed on every status change.
//! - Status transitions are unconstrained; any value may follow any other.

use super::{normalize_variant, ParseVariantError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Civic issue category selected at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplaintCategory {
    Water,
    Electricity,
    Sanitation,
    Road,
    Garbage,
}

impl ComplaintCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Water,
        Self::Electricity,
        Self::Sanitation,
        Self::Road,
        Self::Garbage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Electricity => "Electricity",
            Self::Sanitation => "Sanitation",
            Self::Road => "Road",
            Self::Garbage => "Garbage",
        }
    }
}

impl Display for ComplaintCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintCategory {
    type Err = ParseVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_variant(value);
        Self::ALL
            .into_iter()
            .find(|category| normalize_variant(category.as_str()) == normalized)
            .ok_or_else(|| ParseVariantError {
                kind: "complaint category",
                value: value.to_string(),
            })
    }
}

/// Complaint review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Submitted,
    #[serde(rename = "In Review")]
    InReview,
    Resolved,
}

impl ComplaintStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Submitted, Self::InReview, Self::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InReview => "In Review",
            Self::Resolved => "Resolved",
        }
    }
}

impl Display for ComplaintStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_variant(value);
        Self::ALL
            .into_iter()
            .find(|status| normalize_variant(status.as_str()) == normalized)
            .ok_or_else(|| ParseVariantError {
                kind: "complaint status",
                value: value.to_string(),
            })
    }
}

/// Persisted complaint record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// `complaint-<millis>-<suffix>` for records created by the store.
    pub id: String,
    pub category: ComplaintCategory,
    pub description: String,
    pub location: String,
    /// Optional photo as a `data:image/...;base64,` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new complaint.
///
/// The store assigns `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub category: ComplaintCategory,
    pub description: String,
    pub location: String,
    pub image: Option<String>,
    /// Expected to be `Submitted` for fresh submissions.
    pub status: ComplaintStatus,
}

impl Complaint {
    /// Builds a stored record from submission fields.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    pub fn from_new(new: NewComplaint, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            category: new.category,
            description: new.description,
            location: new.location,
            image: new.image,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a new status and refreshes `updated_at`.
    ///
    /// Self-transitions are accepted and still refresh the timestamp.
    pub fn set_status(&mut self, status: ComplaintStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}
