//! Log records and the shared record collection

use crate::failure::Failure;
use crate::level::Level;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

/// A single emission from a logger
#[derive(Clone, Debug)]
pub struct LogRecord {
    pub logger: String,
    pub level: Level,
    pub message: String,
    pub failure: Option<Failure>,
    pub timestamp: SystemTime,
}

impl LogRecord {
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            failure: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Attach a failure to this record
    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Shared, ordered collection of log records
///
/// Clones observe the same contents. A test hands one to a capture scope as
/// the destination for tracked messages and keeps another to inspect or clear.
#[derive(Clone, Debug, Default)]
pub struct RecordLog {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordLog {
    /// An empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record
    pub fn push(&self, record: LogRecord) {
        self.lock().push(record);
    }

    /// Get all collected records
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages of all collected records, in order
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Check whether a record with exactly this message was collected
    pub fn contains_message(&self, message: &str) -> bool {
        self.lock().iter().any(|r| r.message == message)
    }

    /// Count records matching a predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&LogRecord) -> bool,
    {
        self.lock().iter().filter(|r| predicate(r)).count()
    }

    /// Remove and return all collected records
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// Drop every record
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
