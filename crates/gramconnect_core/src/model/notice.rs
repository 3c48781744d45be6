//! Administrative notice record.
//!
//! # Invariants
//! - `NoticeKind::Festival` notices surface only on their exact `date`.
//! - `NoticeKind::Civic` notices surface whenever `is_active` is set.

use super::{normalize_variant, ParseVariantError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Civic,
    Festival,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Civic => "civic",
            Self::Festival => "festival",
        }
    }
}

impl Display for NoticeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticeKind {
    type Err = ParseVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_variant(value).as_str() {
            "civic" => Ok(Self::Civic),
            "festival" => Ok(Self::Festival),
            _ => Err(ParseVariantError {
                kind: "notice type",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match the persisted layout.
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    pub date: NaiveDate,
    #[serde(default = "super::active_by_default")]
    pub is_active: bool,
}

/// Caller-supplied fields for a new notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotice {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
    pub date: NaiveDate,
    pub is_active: bool,
}

/// Partial notice update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeUpdate {
    pub title: Option<String>,
    pub message: Option<String>,
    pub kind: Option<NoticeKind>,
    pub date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl Notice {
    pub fn from_new(new: NewNotice, id: String) -> Self {
        Self {
            id,
            title: new.title,
            message: new.message,
            kind: new.kind,
            date: new.date,
            is_active: new.is_active,
        }
    }
}

impl NoticeUpdate {
    /// Update that only flips the active flag.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    /// Shallow-merges present fields onto `notice`. The id is never changed.
    pub fn apply_to(self, notice: &mut Notice) {
        if let Some(title) = self.title {
            notice.title = title;
        }
        if let Some(message) = self.message {
            notice.message = message;
        }
        if let Some(kind) = self.kind {
            notice.kind = kind;
        }
        if let Some(date) = self.date {
            notice.date = date;
        }
        if let Some(is_active) = self.is_active {
            notice.is_active = is_active;
        }
    }
}
