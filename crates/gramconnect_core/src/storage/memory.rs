//! Process-local backend, used for tests and ephemeral sessions.

use super::{BackendError, BackendResult, StorageBackend};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key/value map with optional quota and outage simulation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    unavailable: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes whose value is longer than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Backend whose every call fails, like storage in a sandboxed frame.
    pub fn unavailable() -> Self {
        let backend = Self::default();
        backend.set_available(false);
        backend
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.set(!available);
    }

    /// Stores a raw value without any checks; used to stage legacy blobs.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.items.borrow_mut().insert(key.into(), value.into());
    }

    /// Returns the raw stored value, bypassing availability checks.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn ensure_available(&self) -> BackendResult<()> {
        if self.unavailable.get() {
            return Err(BackendError::Unavailable(
                "memory backend disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        self.ensure_available()?;
        if let Some(limit_bytes) = self.quota_bytes {
            if value.len() > limit_bytes {
                return Err(BackendError::QuotaExceeded {
                    limit_bytes,
                    attempted_bytes: value.len(),
                });
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
