//! logscope core - scoped log interception and deferred assertions
//!
//! This crate lets a test take over a named logger for a bounded scope:
//! - Console sinks are swapped for a capture sink and restored afterwards
//! - Failures attached to log records are held back and raised at revert,
//!   unless ignored by instance or by kind
//! - Selected (or all) messages are collected; leftovers fail the scope
//! - Level-only overrides silence noisy loggers for a while
//!
//! Loggers live in an explicit [`LoggerRegistry`]. Code instrumented with
//! `tracing` can feed the registry through
//! [`logging_facility::RegistryLayer`].

pub use logscope_core_types as core_types;

pub mod capture;
pub mod config;
pub mod errors;
pub mod failure;
pub mod format;
pub mod level;
pub mod logger;
pub mod logging_facility;
pub mod record;
pub mod registry;
pub mod sink;

// Re-export commonly used types
pub use capture::{
    remove_console_sinks, restore_console_sinks, LevelScope, ScopeHandle, SinkList, TrackingMode,
};
pub use config::{HarnessConfig, LoggerConfig};
pub use errors::{ErrorKind, HarnessError, Result, ScopeFailure};
pub use failure::{Failure, FailureClass, FailureKind};
pub use format::{RecordFormatter, SimpleFormatter};
pub use level::Level;
pub use logger::{Logger, LoggerRef};
pub use record::{LogRecord, RecordLog};
pub use registry::LoggerRegistry;
pub use sink::{ConsoleSink, MemorySink, Sink, SinkRef};
