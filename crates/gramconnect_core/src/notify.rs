//! Festival reminder notifications.
//!
//! # Responsibility
//! - Build the "day before" notification for a festival reminder.
//! - Dispatch it once after a delay on a detached timer thread.
//!
//! # Invariants
//! - Scheduling is fire-and-forget: no cancellation handle is kept, so
//!   removing a reminder does not cancel a pending timer.
//! - Nothing here touches persisted state.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{debug, info};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not yet asked.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

/// Platform notification channel.
pub trait Notifier {
    fn permission(&self) -> Permission;
    /// Asks the user for permission; returns the resulting state.
    fn request_permission(&self) -> Permission;
    fn dispatch(&self, notification: &Notification);
}

/// Notifier that records dispatches in the log.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    permission: Permission,
}

impl LogNotifier {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(Permission::Granted)
    }
}

impl Notifier for LogNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn dispatch(&self, notification: &Notification) {
        info!(
            "event=notification_dispatch module=notify status=ok title_chars={} fire_at={}",
            notification.title.chars().count(),
            notification.fire_at.to_rfc3339()
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled { delay: Duration },
    PermissionNotGranted,
    /// Fire time is not in the future; nothing is dispatched.
    Elapsed,
}

/// Notification fired one day before the festival's local midnight in `tz`.
pub fn reminder_notification<Tz: TimeZone>(
    festival_name: &str,
    festival_date: NaiveDate,
    tz: &Tz,
) -> Notification {
    let midnight = festival_date.and_time(NaiveTime::MIN);
    let festival_start = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());

    Notification {
        title: format!("{festival_name} Tomorrow!"),
        body: format!(
            "Don't forget to celebrate {festival_name} tomorrow. Prepare traditional foods and enjoy the festivities!"
        ),
        fire_at: festival_start - Duration::days(1),
    }
}

/// Requests permission if needed, then schedules a single dispatch.
pub fn schedule_notification<N>(
    notifier: Arc<N>,
    notification: Notification,
    now: DateTime<Utc>,
) -> ScheduleOutcome
where
    N: Notifier + Send + Sync + 'static,
{
    let permission = match notifier.permission() {
        Permission::Default => notifier.request_permission(),
        other => other,
    };
    if permission != Permission::Granted {
        debug!("event=notification_schedule module=notify status=skipped reason=permission");
        return ScheduleOutcome::PermissionNotGranted;
    }

    let delay = notification.fire_at - now;
    let Ok(sleep_for) = delay.to_std() else {
        debug!("event=notification_schedule module=notify status=skipped reason=elapsed");
        return ScheduleOutcome::Elapsed;
    };
    if sleep_for.is_zero() {
        debug!("event=notification_schedule module=notify status=skipped reason=elapsed");
        return ScheduleOutcome::Elapsed;
    }

    info!(
        "event=notification_schedule module=notify status=ok delay_ms={}",
        delay.num_milliseconds()
    );
    thread::spawn(move || {
        thread::sleep(sleep_for);
        notifier.dispatch(&notification);
    });
    ScheduleOutcome::Scheduled { delay }
}
