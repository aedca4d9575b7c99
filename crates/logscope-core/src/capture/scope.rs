//! The scope handle returned by a logger capture

use super::capture_sink::CaptureSink;
use super::handlers::{remove_console_sinks, restore_console_sinks, SinkList};
use super::tracking::TrackingMode;
use crate::core_types::schema::{EVENT_CAPTURE, EVENT_LEVEL_OVERRIDE, EVENT_REVERT};
use crate::core_types::ScopeId;
use crate::errors::{Result, ScopeFailure};
use crate::failure::{Failure, FailureClass, FailureKind};
use crate::format::{RecordFormatter, SimpleFormatter};
use crate::level::Level;
use crate::logger::LoggerRef;
use crate::record::RecordLog;
use crate::registry::{Lease, LoggerRegistry};
use crate::sink::SinkRef;
use crate::{log_scope_event, log_scope_failure};
use std::sync::Arc;

/// One active capture of a logger
///
/// Created by [`LoggerRegistry::capture`]. While the handle is alive, the
/// logger's console sinks are detached and a capture sink records failures
/// and tracked messages. [`ScopeHandle::revert`] restores the logger and
/// reports at most one deferred failure.
///
/// A handle dropped without `revert` restores the logger the same way and
/// panics with the deferred failure, unless the thread is already panicking.
///
/// ```
/// use logscope_core::{Failure, FailureKind, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// let mut scope = registry.capture("Operator").unwrap();
/// scope.ignore_failure_kinds([FailureKind::new("ApiException")]);
///
/// registry
///     .resolve("Operator")
///     .error_with("call failed", Failure::checked(FailureKind::new("ApiException"), "404"));
///
/// assert!(scope.revert().is_ok());
/// ```
pub struct ScopeHandle {
    scope_id: ScopeId,
    logger: LoggerRef,
    capture: Arc<CaptureSink>,
    capture_ref: SinkRef,
    saved_sinks: SinkList,
    // Outer None: never saved. Some(None): the original level was unset.
    saved_level: Option<Option<Level>>,
    formatter: Arc<dyn RecordFormatter>,
    report_failures: bool,
    lease: Option<Lease>,
    reverted: bool,
}

impl ScopeHandle {
    pub(crate) fn capture(registry: &LoggerRegistry, name: &str) -> Result<Self> {
        let lease = registry.acquire(name, "capture")?;
        let logger = registry.resolve(name);

        let saved_sinks = remove_console_sinks(&logger);
        let capture = Arc::new(CaptureSink::new());
        let capture_ref: SinkRef = capture.clone();
        logger.attach_sink(capture_ref.clone());

        let scope_id = ScopeId::new();
        log_scope_event!(
            EVENT_CAPTURE,
            name,
            scope_id,
            saved_sinks = saved_sinks.len()
        );

        Ok(Self {
            scope_id,
            logger,
            capture,
            capture_ref,
            saved_sinks,
            saved_level: None,
            formatter: Arc::new(SimpleFormatter),
            report_failures: registry.report_failures(),
            lease: Some(lease),
            reverted: false,
        })
    }

    /// Suppress these specific failure instances
    pub fn ignore_failures<I>(&mut self, failures: I) -> &mut Self
    where
        I: IntoIterator<Item = Failure>,
    {
        for failure in failures {
            self.capture.ignore_failure(failure);
        }
        self
    }

    /// Suppress every failure of these kinds
    pub fn ignore_failure_kinds<I>(&mut self, kinds: I) -> &mut Self
    where
        I: IntoIterator<Item = FailureKind>,
    {
        for kind in kinds {
            self.capture.ignore_kind(kind);
        }
        self
    }

    /// Collect records with any of these messages into `into`
    pub fn track_messages<I, S>(&mut self, into: &RecordLog, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capture
            .set_tracking(TrackingMode::specific(into.clone(), messages));
        self
    }

    /// Collect every record into `into`
    pub fn track_all_messages(&mut self, into: &RecordLog) -> &mut Self {
        self.capture.set_tracking(TrackingMode::all(into.clone()));
        self
    }

    /// Stop collecting `message` under `track_messages`
    ///
    /// Earlier collected records are kept. Has no effect under
    /// `track_all_messages`.
    pub fn untrack_message(&mut self, message: &str) -> &mut Self {
        self.capture.untrack(message);
        self
    }

    /// Change the logger's level for the rest of the scope
    ///
    /// Only the first call records the level to restore.
    pub fn override_level(&mut self, level: Level) -> &mut Self {
        if self.saved_level.is_none() {
            self.saved_level = Some(self.logger.level());
        }
        self.logger.set_level(Some(level));
        log_scope_event!(
            EVENT_LEVEL_OVERRIDE,
            self.logger.name(),
            self.scope_id,
            level = %level
        );
        self
    }

    /// Render leftover tracked records with a different formatter
    pub fn format_with(&mut self, formatter: impl RecordFormatter + 'static) -> &mut Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Id carried by this scope's diagnostic events
    pub fn scope_id(&self) -> &ScopeId {
        &self.scope_id
    }

    /// The captured logger
    pub fn logger(&self) -> &LoggerRef {
        &self.logger
    }

    /// Console sinks removed at capture time
    pub fn saved_sinks(&self) -> &SinkList {
        &self.saved_sinks
    }

    /// The failure that would be raised if the scope closed now
    pub fn pending_failure(&self) -> Option<Failure> {
        self.capture.pending_failure()
    }

    /// Restore the logger and report what the scope observed
    ///
    /// The logger's sinks and level are restored before anything is
    /// reported.
    ///
    /// # Errors
    ///
    /// - `Logged` or `Wrapped` if a non-ignored failure was emitted; this
    ///   takes priority over tracked messages
    /// - `UnexpectedMessages` if the tracking destination is non-empty
    pub fn revert(mut self) -> std::result::Result<(), ScopeFailure> {
        self.reverted = true;
        self.restore();
        self.outcome()
    }

    fn restore(&mut self) {
        self.logger.detach_sink(&self.capture_ref);
        restore_console_sinks(&self.logger, &self.saved_sinks);
        if let Some(level) = self.saved_level.take() {
            self.logger.set_level(level);
        }
        self.lease.take();

        log_scope_event!(EVENT_REVERT, self.logger.name(), self.scope_id);
    }

    fn outcome(&self) -> std::result::Result<(), ScopeFailure> {
        if let Some(failure) = self.capture.pending_failure() {
            if self.report_failures {
                log_scope_failure!(self.logger.name(), self.scope_id, failure);
            }
            return Err(match failure.class() {
                FailureClass::Fatal | FailureClass::Unchecked => ScopeFailure::Logged(failure),
                FailureClass::Checked => ScopeFailure::Wrapped { cause: failure },
            });
        }

        if let Some(into) = self.capture.tracking_destination() {
            let records = into.records();
            if !records.is_empty() {
                let rendered = records.iter().map(|r| self.formatter.format(r)).collect();
                return Err(ScopeFailure::UnexpectedMessages(rendered));
            }
        }

        Ok(())
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        if self.reverted {
            return;
        }
        self.reverted = true;
        self.restore();
        if let Err(failure) = self.outcome() {
            if !std::thread::panicking() {
                panic!("{}", failure);
            }
        }
    }
}

impl std::fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeHandle")
            .field("scope_id", &self.scope_id)
            .field("logger", &self.logger.name())
            .field("saved_sinks", &self.saved_sinks)
            .field("saved_level", &self.saved_level)
            .finish_non_exhaustive()
    }
}
