//! Derived views over stored data and the festival catalog.
//!
//! # Responsibility
//! - Compute read-only subsets and orderings for display.
//! - Provide calendar helpers in local wall-clock time.
//!
//! # Invariants
//! - Functions here are pure; time-dependent helpers have an `*_at`
//!   variant taking an explicit local `now`.
//! - Nothing computed here is persisted.

mod dates;
mod filter;
mod notices;
mod upcoming;

pub use dates::{
    days_until, days_until_at, format_date, format_timestamp, format_timestamp_local, is_today,
    is_today_at, is_upcoming, is_upcoming_at, local_now,
};
pub use filter::{status_counts, ComplaintFilter, StatusCounts};
pub use notices::{active_notices, visible_notices};
pub use upcoming::{
    upcoming_festivals, upcoming_festivals_at, upcoming_reminders, upcoming_reminders_at,
};

/// Default look-ahead window for upcoming festivals and reminders.
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
