//! Calendar helpers in local wall-clock time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn is_today(date: NaiveDate) -> bool {
    is_today_at(date, local_now())
}

/// True iff `date` is the calendar day of `now`.
pub fn is_today_at(date: NaiveDate, now: NaiveDateTime) -> bool {
    now.date() == date
}

pub fn days_until(date: NaiveDate) -> i64 {
    days_until_at(date, local_now())
}

/// Whole days from `now` to the start of `date`, rounded up.
///
/// Zero on the day itself, negative for past days.
pub fn days_until_at(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let delta_ms = date
        .and_time(NaiveTime::MIN)
        .signed_duration_since(now)
        .num_milliseconds();
    // Integer division truncates toward zero, which is the ceiling for
    // negative deltas.
    let days = delta_ms / MILLIS_PER_DAY;
    if delta_ms > 0 && delta_ms % MILLIS_PER_DAY != 0 {
        days + 1
    } else {
        days
    }
}

pub fn is_upcoming(date: NaiveDate, within_days: i64) -> bool {
    is_upcoming_at(date, within_days, local_now())
}

/// True iff `0 <= days_until <= within_days`.
pub fn is_upcoming_at(date: NaiveDate, within_days: i64, now: NaiveDateTime) -> bool {
    (0..=within_days).contains(&days_until_at(date, now))
}

/// Long display date, e.g. `15 January 2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Feed timestamp in `tz`, e.g. `10 Jan 2025, 04:00 pm`.
pub fn format_timestamp<Tz: TimeZone>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%-d %b %Y, %I:%M %P")
        .to_string()
}

pub fn format_timestamp_local(timestamp: DateTime<Utc>) -> String {
    format_timestamp(timestamp, &Local)
}
