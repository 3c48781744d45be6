//! Local persistence store for the civic app aggregate.
//!
//! # Responsibility
//! - Own the single versioned aggregate blob in a `StorageBackend`.
//! - Seed first-run data and coerce stale versions on read.
//! - Expose CRUD entry points for complaints, reminders and notices.
//!
//! # Invariants
//! - Every mutation is a full read-modify-write of the aggregate.
//! - No operation returns an error or panics because of storage health;
//!   failures go to the injected `StoreReporter` and the call degrades to
//!   in-memory behavior.
//! - Not-found updates and deletes are silent no-ops.

mod aggregate;
mod ids;

pub use ids::generate_id;

use crate::clock::{Clock, SystemClock};
use crate::model::aggregate::StorageData;
use crate::model::complaint::{Complaint, ComplaintStatus, NewComplaint};
use crate::model::notice::{NewNotice, Notice, NoticeUpdate};
use crate::model::reminder::{NewReminder, Reminder};
use crate::report::{FailureKind, LogReporter, StoreFailure, StoreReporter};
use crate::storage::StorageBackend;
use aggregate::{decode_aggregate, Origin};
use chrono::NaiveDate;
use log::{debug, info};

/// Key under which the aggregate blob is stored.
pub const DEFAULT_STORAGE_KEY: &str = "gramconnect_data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Versioned aggregate store over a key/value backend.
///
/// Construct once and pass by reference to every consumer.
pub struct LocalStore<B: StorageBackend> {
    backend: B,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    reporter: Box<dyn StoreReporter>,
}

impl<B: StorageBackend> LocalStore<B> {
    /// Creates a store with the default key, system clock and log reporter.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self {
            backend,
            config,
            clock: Box::new(SystemClock),
            reporter: Box::new(LogReporter),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_reporter(mut self, reporter: impl StoreReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the current aggregate.
    ///
    /// # Contract
    /// - Nothing stored: persists and returns `StorageData::seeded()`.
    /// - Stale version: persists and returns the coerced aggregate.
    /// - Unreadable records or collections: reports them and returns the
    ///   readable remainder without persisting it.
    /// - Backend failure or a blob that is not JSON: reports and returns the
    ///   seed in memory without persisting it.
    pub fn read(&self) -> StorageData {
        let key = self.config.storage_key.as_str();
        let stored = match self.backend.get_item(key) {
            Ok(stored) => stored,
            Err(err) => {
                self.report(FailureKind::Read, err.to_string());
                return StorageData::seeded();
            }
        };

        let Some(raw) = stored else {
            let data = StorageData::seeded();
            self.write(&data);
            info!("event=store_seed module=store status=ok key={key}");
            return data;
        };

        let decoded = match decode_aggregate(&raw) {
            Ok(decoded) => decoded,
            Err(err) => {
                self.report(FailureKind::Parse, err.to_string());
                return StorageData::seeded();
            }
        };

        if !decoded.skipped.is_empty() {
            self.report(
                FailureKind::Parse,
                format!(
                    "skipped {} unreadable entries: {}",
                    decoded.skipped.len(),
                    decoded.skipped.join("; ")
                ),
            );
        }

        if let Origin::Migrated { from_version } = decoded.origin {
            // A lossy decode leaves the stored blob untouched until the next
            // mutation.
            if decoded.skipped.is_empty() {
                self.write(&decoded.data);
            }
            info!(
                "event=store_migrate module=store status=ok key={key} from_version={} to_version={} skipped={}",
                from_version.map_or_else(|| "none".to_string(), |v| v.to_string()),
                decoded.data.version,
                decoded.skipped.len()
            );
        }
        decoded.data
    }

    /// Persists the full aggregate. Failures are reported, never returned.
    pub fn write(&self, data: &StorageData) {
        let key = self.config.storage_key.as_str();
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(err) => {
                self.report(FailureKind::Serialize, err.to_string());
                return;
            }
        };

        match self.backend.set_item(key, &json) {
            Ok(()) => debug!(
                "event=store_write module=store status=ok key={key} bytes={}",
                json.len()
            ),
            Err(err) => self.report(FailureKind::Write, err.to_string()),
        }
    }

    /// All complaints, most recently created first.
    pub fn list_complaints(&self) -> Vec<Complaint> {
        self.read().complaints
    }

    /// Stamps id and timestamps, prepends, persists and returns the record.
    pub fn add_complaint(&self, new: NewComplaint) -> Complaint {
        let mut data = self.read();
        let now = self.clock.now();
        let complaint = Complaint::from_new(new, generate_id("complaint", now), now);

        data.complaints.insert(0, complaint.clone());
        self.write(&data);
        info!(
            "event=complaint_add module=store status=ok complaint_id={} category={}",
            complaint.id, complaint.category
        );
        complaint
    }

    /// Sets status and refreshes `updated_at`. Unknown ids are ignored.
    ///
    /// Any transition is accepted, including to the current status.
    pub fn update_complaint_status(&self, id: &str, status: ComplaintStatus) {
        let mut data = self.read();
        let Some(complaint) = data.complaints.iter_mut().find(|c| c.id == id) else {
            debug!("event=complaint_status module=store status=skipped reason=not_found complaint_id={id}");
            return;
        };

        let previous = complaint.status;
        complaint.set_status(status, self.clock.now());
        self.write(&data);
        info!(
            "event=complaint_status module=store status=ok complaint_id={id} from={previous} to={status}"
        );
    }

    pub fn list_reminders(&self) -> Vec<Reminder> {
        self.read().reminders
    }

    /// Appends a reminder without any per-festival uniqueness check.
    ///
    /// Use `toggle_reminder` to keep at most one reminder per festival.
    pub fn add_reminder(&self, new: NewReminder) -> Reminder {
        let mut data = self.read();
        let now = self.clock.now();
        let reminder = Reminder::from_new(new, generate_id("reminder", now), now);

        data.reminders.push(reminder.clone());
        self.write(&data);
        info!(
            "event=reminder_add module=store status=ok reminder_id={} festival_id={}",
            reminder.id, reminder.festival_id
        );
        reminder
    }

    /// Removes every reminder for `festival_id`.
    pub fn remove_reminder(&self, festival_id: &str) {
        let mut data = self.read();
        let before = data.reminders.len();
        data.reminders.retain(|r| r.festival_id != festival_id);
        self.write(&data);
        info!(
            "event=reminder_remove module=store status=ok festival_id={festival_id} removed={}",
            before - data.reminders.len()
        );
    }

    /// Flips the reminder for a festival.
    ///
    /// Returns `true` when a reminder now exists, `false` when it was removed.
    pub fn toggle_reminder(
        &self,
        festival_id: &str,
        festival_name: &str,
        festival_date: NaiveDate,
    ) -> bool {
        let mut data = self.read();
        if data.reminders.iter().any(|r| r.festival_id == festival_id) {
            data.reminders.retain(|r| r.festival_id != festival_id);
            self.write(&data);
            info!("event=reminder_toggle module=store status=ok festival_id={festival_id} active=false");
            return false;
        }

        self.add_reminder(NewReminder {
            festival_id: festival_id.to_string(),
            festival_name: festival_name.to_string(),
            festival_date,
            is_active: true,
        });
        info!("event=reminder_toggle module=store status=ok festival_id={festival_id} active=true");
        true
    }

    pub fn has_reminder(&self, festival_id: &str) -> bool {
        self.read()
            .reminders
            .iter()
            .any(|r| r.festival_id == festival_id)
    }

    pub fn list_notices(&self) -> Vec<Notice> {
        self.read().notices
    }

    pub fn add_notice(&self, new: NewNotice) -> Notice {
        let mut data = self.read();
        let notice = Notice::from_new(new, generate_id("notice", self.clock.now()));

        data.notices.push(notice.clone());
        self.write(&data);
        info!(
            "event=notice_add module=store status=ok notice_id={} type={}",
            notice.id, notice.kind
        );
        notice
    }

    /// Shallow-merges `update` onto the notice. Unknown ids are ignored.
    pub fn update_notice(&self, id: &str, update: NoticeUpdate) {
        let mut data = self.read();
        let Some(notice) = data.notices.iter_mut().find(|n| n.id == id) else {
            debug!("event=notice_update module=store status=skipped reason=not_found notice_id={id}");
            return;
        };

        update.apply_to(notice);
        self.write(&data);
        info!("event=notice_update module=store status=ok notice_id={id}");
    }

    /// Admin shortcut for toggling notice visibility.
    pub fn set_notice_active(&self, id: &str, is_active: bool) {
        self.update_notice(id, NoticeUpdate::active(is_active));
    }

    pub fn delete_notice(&self, id: &str) {
        let mut data = self.read();
        data.notices.retain(|n| n.id != id);
        self.write(&data);
        info!("event=notice_delete module=store status=ok notice_id={id}");
    }

    fn report(&self, kind: FailureKind, message: String) {
        self.reporter.report(&StoreFailure {
            kind,
            key: self.config.storage_key.clone(),
            message,
        });
    }
}
