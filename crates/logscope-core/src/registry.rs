//! Logger registry
//!
//! The registry is an explicit object handed to capture operations rather
//! than a process-wide global, so independent tests can use independent
//! registries. Clones share the same loggers.
//!
//! The registry also serializes captures: each logger identifier can be held
//! by at most one active scope at a time.

use crate::capture::{LevelScope, ScopeHandle};
use crate::config::HarnessConfig;
use crate::errors::{HarnessError, Result};
use crate::level::Level;
use crate::logger::{Logger, LoggerRef};
use crate::sink::ConsoleSink;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type LeaseSet = Arc<Mutex<HashSet<String>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct RegistryInner {
    loggers: Mutex<BTreeMap<String, LoggerRef>>,
    leases: LeaseSet,
    quiet_level: Level,
    report_failures: bool,
}

/// Resolves logger identifiers to shared logger instances
#[derive(Clone)]
pub struct LoggerRegistry {
    inner: Arc<RegistryInner>,
}

impl LoggerRegistry {
    /// An empty registry with default settings
    pub fn new() -> Self {
        Self::with_settings(&HarnessConfig::default())
    }

    fn with_settings(config: &HarnessConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                loggers: Mutex::new(BTreeMap::new()),
                leases: Arc::new(Mutex::new(HashSet::new())),
                quiet_level: config.quiet_level,
                report_failures: config.report_failures,
            }),
        }
    }

    /// A registry pre-populated with the loggers a config describes
    pub fn from_config(config: &HarnessConfig) -> Self {
        let registry = Self::with_settings(config);
        for logger_config in &config.loggers {
            let logger = registry.resolve(&logger_config.name);
            logger.set_level(logger_config.level);
            if logger_config.console {
                logger.attach_sink(
                    ConsoleSink::stderr(format!("{}-console", logger_config.name)).into_ref(),
                );
            }
        }
        registry
    }

    /// Resolve an identifier, creating the logger on first use
    pub fn resolve(&self, name: &str) -> LoggerRef {
        let mut loggers = lock(&self.inner.loggers);
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name)))
            .clone()
    }

    /// Look up an existing logger without creating it
    pub fn get(&self, name: &str) -> Option<LoggerRef> {
        lock(&self.inner.loggers).get(name).cloned()
    }

    /// Names of all known loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        lock(&self.inner.loggers).keys().cloned().collect()
    }

    /// Level applied by [`LevelScope::quiet`]
    pub fn quiet_level(&self) -> Level {
        self.inner.quiet_level
    }

    pub(crate) fn report_failures(&self) -> bool {
        self.inner.report_failures
    }

    /// Whether a scope currently holds this identifier
    pub fn is_captured(&self, name: &str) -> bool {
        lock(&self.inner.leases).contains(name)
    }

    /// Swap the console sinks of a logger for a capture sink
    ///
    /// # Errors
    ///
    /// Returns `LoggerBusy` if another scope holds the logger.
    pub fn capture(&self, name: &str) -> Result<ScopeHandle> {
        ScopeHandle::capture(self, name)
    }

    /// Override a logger's level with the configured quiet level
    ///
    /// # Errors
    ///
    /// Returns `LoggerBusy` if another scope holds the logger.
    pub fn quiet(&self, name: &str) -> Result<LevelScope> {
        LevelScope::quiet(self, name)
    }

    pub(crate) fn acquire(&self, name: &str, op: &str) -> Result<Lease> {
        let mut leases = lock(&self.inner.leases);
        if !leases.insert(name.to_string()) {
            return Err(HarnessError::logger_busy(name, op));
        }
        Ok(Lease {
            name: name.to_string(),
            leases: Arc::clone(&self.inner.leases),
        })
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.logger_names())
            .field("quiet_level", &self.inner.quiet_level)
            .finish_non_exhaustive()
    }
}

/// Exclusive hold on a logger identifier; released on drop
pub(crate) struct Lease {
    name: String,
    leases: LeaseSet,
}

impl Drop for Lease {
    fn drop(&mut self) {
        lock(&self.leases).remove(&self.name);
    }
}
