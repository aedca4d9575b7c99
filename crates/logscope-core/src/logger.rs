//! Named loggers

use crate::failure::Failure;
use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::{same_sink, SinkRef};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a logger
pub type LoggerRef = Arc<Logger>;

/// A named, severity-leveled event-emission facility
///
/// A logger holds an ordered list of sinks and an optional minimum level.
/// When the level is unset, every record is published.
pub struct Logger {
    name: String,
    sinks: RwLock<Vec<SinkRef>>,
    level: RwLock<Option<Level>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl Logger {
    /// Create a logger with no sinks and an unset level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sinks: RwLock::new(Vec::new()),
            level: RwLock::new(None),
        }
    }

    /// Identifier the logger was resolved by
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currently attached sinks, in attach order
    pub fn sinks(&self) -> Vec<SinkRef> {
        read(&self.sinks).clone()
    }

    /// Append a sink to the end of the list
    pub fn attach_sink(&self, sink: SinkRef) {
        write(&self.sinks).push(sink);
    }

    /// Insert a sink at a position, clamped to the end of the list
    pub fn insert_sink(&self, index: usize, sink: SinkRef) {
        let mut sinks = write(&self.sinks);
        let index = index.min(sinks.len());
        sinks.insert(index, sink);
    }

    /// Detach a sink by identity; returns whether it was attached
    pub fn detach_sink(&self, sink: &SinkRef) -> bool {
        let mut sinks = write(&self.sinks);
        match sinks.iter().position(|s| same_sink(s, sink)) {
            Some(index) => {
                sinks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Minimum level, or `None` when unset
    pub fn level(&self) -> Option<Level> {
        *read(&self.level)
    }

    /// Set or clear the minimum level
    pub fn set_level(&self, level: Option<Level>) {
        *write(&self.level) = level;
    }

    /// Whether a record at `level` would be published
    pub fn is_enabled(&self, level: Level) -> bool {
        match self.level() {
            Some(min) => level >= min,
            None => true,
        }
    }

    /// Publish a record to every attached sink if its level is enabled
    pub fn log(&self, record: LogRecord) {
        if !self.is_enabled(record.level) {
            return;
        }
        // Sinks run outside the lock so they may log or reconfigure freely
        let sinks = self.sinks();
        for sink in &sinks {
            sink.publish(&record);
        }
    }

    fn emit(&self, level: Level, message: impl Into<String>, failure: Option<Failure>) {
        let mut record = LogRecord::new(self.name.clone(), level, message);
        record.failure = failure;
        self.log(record);
    }

    /// Emit a trace record
    pub fn trace(&self, message: impl Into<String>) {
        self.emit(Level::Trace, message, None);
    }

    /// Emit a debug record
    pub fn debug(&self, message: impl Into<String>) {
        self.emit(Level::Debug, message, None);
    }

    /// Emit an info record
    pub fn info(&self, message: impl Into<String>) {
        self.emit(Level::Info, message, None);
    }

    /// Emit a warning record
    pub fn warn(&self, message: impl Into<String>) {
        self.emit(Level::Warn, message, None);
    }

    /// Emit an error record
    pub fn error(&self, message: impl Into<String>) {
        self.emit(Level::Error, message, None);
    }

    /// Emit a warning carrying a failure
    pub fn warn_with(&self, message: impl Into<String>, failure: Failure) {
        self.emit(Level::Warn, message, Some(failure));
    }

    /// Emit an error carrying a failure
    pub fn error_with(&self, message: impl Into<String>, failure: Failure) {
        self.emit(Level::Error, message, Some(failure));
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sinks: Vec<String> = read(&self.sinks)
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("sinks", &sinks)
            .field("level", &self.level())
            .finish()
    }
}
