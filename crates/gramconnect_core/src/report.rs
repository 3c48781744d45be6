//! Failure reporting for the never-throw store contract.
//!
//! # Responsibility
//! - Make swallowed storage failures observable without surfacing them to
//!   store callers.
//!
//! # Invariants
//! - Reporters must not panic; the store calls them on its error paths.
//! - Reports carry metadata and error text only, never the stored blob.

use log::error;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Stage of the storage round-trip that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Backend refused to return the stored blob.
    Read,
    /// Stored blob is not a decodable aggregate.
    Parse,
    /// Aggregate could not be encoded.
    Serialize,
    /// Backend refused to persist the blob.
    Write,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Parse => "parse",
            Self::Serialize => "serialize",
            Self::Write => "write",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub kind: FailureKind,
    /// Storage key involved.
    pub key: String,
    pub message: String,
}

impl Display for StoreFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "storage {} failed for `{}`: {}",
            self.kind.as_str(),
            self.key,
            self.message
        )
    }
}

pub trait StoreReporter {
    fn report(&self, failure: &StoreFailure);
}

/// Default reporter; emits one `error` log event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl StoreReporter for LogReporter {
    fn report(&self, failure: &StoreFailure) {
        error!(
            "event=storage_{} module=store status=error key={} error={}",
            failure.kind.as_str(),
            failure.key,
            failure.message
        );
    }
}

/// Keeps every report in memory, for diagnostics panels and tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    failures: RefCell<Vec<StoreFailure>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<StoreFailure> {
        self.failures.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<FailureKind> {
        self.failures
            .borrow()
            .iter()
            .map(|failure| failure.kind)
            .collect()
    }
}

impl StoreReporter for MemoryReporter {
    fn report(&self, failure: &StoreFailure) {
        self.failures.borrow_mut().push(failure.clone());
    }
}

impl<R: StoreReporter + ?Sized> StoreReporter for Rc<R> {
    fn report(&self, failure: &StoreFailure) {
        (**self).report(failure);
    }
}
