//! Core domain logic for GramConnect.
//! Local-first store for civic complaints, festival reminders and notices,
//! plus the derived views the app renders from them.

pub mod catalog;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod report;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use catalog::{CatalogError, FestivalCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::aggregate::{StorageData, CURRENT_VERSION};
pub use model::complaint::{Complaint, ComplaintCategory, ComplaintStatus, NewComplaint};
pub use model::festival::{Festival, FestivalFood};
pub use model::notice::{NewNotice, Notice, NoticeKind, NoticeUpdate};
pub use model::reminder::{NewReminder, Reminder};
pub use model::ParseVariantError;
pub use notify::{
    reminder_notification, schedule_notification, LogNotifier, Notification, Notifier,
    Permission, ScheduleOutcome,
};
pub use report::{FailureKind, LogReporter, MemoryReporter, StoreFailure, StoreReporter};
pub use storage::{BackendError, BackendResult, MemoryBackend, SqliteBackend, StorageBackend};
pub use store::{LocalStore, StoreConfig, DEFAULT_STORAGE_KEY};
pub use validation::{ComplaintDraft, ComplaintField, FieldErrors};
pub use view::{ComplaintFilter, StatusCounts, DEFAULT_UPCOMING_DAYS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
