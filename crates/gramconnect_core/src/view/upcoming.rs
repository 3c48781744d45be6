//! Look-ahead windows over festivals and reminders.

use super::dates::{is_upcoming_at, local_now};
use crate::model::festival::Festival;
use crate::model::reminder::Reminder;
use chrono::NaiveDateTime;

pub fn upcoming_festivals(festivals: &[Festival], within_days: i64) -> Vec<Festival> {
    upcoming_festivals_at(festivals, within_days, local_now())
}

/// Festivals within the window, ascending by date.
///
/// The sort is stable: festivals on the same date keep catalog order.
pub fn upcoming_festivals_at(
    festivals: &[Festival],
    within_days: i64,
    now: NaiveDateTime,
) -> Vec<Festival> {
    let mut upcoming: Vec<Festival> = festivals
        .iter()
        .filter(|festival| is_upcoming_at(festival.date, within_days, now))
        .cloned()
        .collect();
    upcoming.sort_by_key(|festival| festival.date);
    upcoming
}

pub fn upcoming_reminders(reminders: &[Reminder], within_days: i64) -> Vec<Reminder> {
    upcoming_reminders_at(reminders, within_days, local_now())
}

/// Reminders whose festival falls within the window, ascending by date.
pub fn upcoming_reminders_at(
    reminders: &[Reminder],
    within_days: i64,
    now: NaiveDateTime,
) -> Vec<Reminder> {
    let mut upcoming: Vec<Reminder> = reminders
        .iter()
        .filter(|reminder| is_upcoming_at(reminder.festival_date, within_days, now))
        .cloned()
        .collect();
    upcoming.sort_by_key(|reminder| reminder.festival_date);
    upcoming
}
