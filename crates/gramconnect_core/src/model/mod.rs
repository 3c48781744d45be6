//! Domain records shared by the store, views and catalog.
//!
//! # Responsibility
//! - Define the persisted record shapes (complaints, reminders, notices).
//! - Define the read-only festival catalog shape.
//! - Keep the JSON wire layout stable across releases.
//!
//! # Invariants
//! - Persisted record keys are camelCase; catalog keys are snake_case.
//! - Calendar dates serialize as `YYYY-MM-DD`, timestamps as RFC 3339 UTC.

pub mod aggregate;
pub mod complaint;
pub mod festival;
pub mod notice;
pub mod reminder;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned when text does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError {
    /// Human-readable enum name, e.g. `complaint category`.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

impl Display for ParseVariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: `{}`", self.kind, self.value)
    }
}

impl Error for ParseVariantError {}

/// Lowercases and strips separators so `In Review`, `in-review` and
/// `IN_REVIEW` compare equal.
pub(crate) fn normalize_variant(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Serde default for `is_active` flags missing from older records.
pub(crate) fn active_by_default() -> bool {
    true
}
