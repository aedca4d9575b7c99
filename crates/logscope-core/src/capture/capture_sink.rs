//! The sink a capture scope installs in place of console sinks

use super::tracking::TrackingMode;
use crate::failure::{Failure, FailureKind};
use crate::record::{LogRecord, RecordLog};
use crate::sink::Sink;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct CaptureState {
    pending_failure: Option<Failure>,
    ignored_failures: Vec<Failure>,
    ignored_kinds: HashSet<FailureKind>,
    tracking: TrackingMode,
}

impl CaptureState {
    fn is_ignored(&self, failure: &Failure) -> bool {
        self.ignored_kinds.contains(failure.kind())
            || self.ignored_failures.iter().any(|f| f.same_instance(failure))
    }
}

/// Records failures and tracked messages while attached
///
/// Nothing is raised during ingestion; the owning scope inspects the state
/// when it is reverted.
#[derive(Default)]
pub(crate) struct CaptureSink {
    state: Mutex<CaptureState>,
}

impl CaptureSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn ignore_failure(&self, failure: Failure) {
        self.lock().ignored_failures.push(failure);
    }

    pub(crate) fn ignore_kind(&self, kind: FailureKind) {
        self.lock().ignored_kinds.insert(kind);
    }

    pub(crate) fn set_tracking(&self, mode: TrackingMode) {
        self.lock().tracking = mode;
    }

    pub(crate) fn untrack(&self, message: &str) {
        self.lock().tracking.untrack(message);
    }

    pub(crate) fn pending_failure(&self) -> Option<Failure> {
        self.lock().pending_failure.clone()
    }

    pub(crate) fn tracking_destination(&self) -> Option<RecordLog> {
        self.lock().tracking.destination().cloned()
    }
}

impl Sink for CaptureSink {
    fn publish(&self, record: &LogRecord) {
        let mut state = self.lock();

        if let Some(failure) = &record.failure {
            if !state.is_ignored(failure) {
                // Last write wins
                state.pending_failure = Some(failure.clone());
            }
        }

        if state.tracking.should_track(record) {
            if let Some(into) = state.tracking.destination() {
                into.push(record.clone());
            }
        }
    }

    fn name(&self) -> &str {
        "capture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    const API: FailureKind = FailureKind::new("ApiException");

    fn failing(message: &str, failure: &Failure) -> LogRecord {
        LogRecord::new("Operator", Level::Error, message).with_failure(failure.clone())
    }

    #[test]
    fn test_last_failure_wins() {
        let sink = CaptureSink::new();
        let first = Failure::unchecked(API, "first");
        let second = Failure::unchecked(API, "second");

        sink.publish(&failing("one", &first));
        sink.publish(&failing("two", &second));

        assert_eq!(sink.pending_failure(), Some(second));
    }

    #[test]
    fn test_ignored_instance_never_pending() {
        let sink = CaptureSink::new();
        let failure = Failure::unchecked(API, "expected");
        sink.ignore_failure(failure.clone());

        sink.publish(&failing("one", &failure));

        assert!(sink.pending_failure().is_none());
    }

    #[test]
    fn test_instance_match_is_by_identity() {
        let sink = CaptureSink::new();
        sink.ignore_failure(Failure::unchecked(API, "expected"));

        let lookalike = Failure::unchecked(API, "expected");
        sink.publish(&failing("one", &lookalike));

        assert_eq!(sink.pending_failure(), Some(lookalike));
    }

    #[test]
    fn test_ignored_kind_never_pending() {
        let sink = CaptureSink::new();
        sink.ignore_kind(API);

        sink.publish(&failing("one", &Failure::checked(API, "x")));

        assert!(sink.pending_failure().is_none());
    }

    #[test]
    fn test_ignored_failure_keeps_earlier_pending() {
        let sink = CaptureSink::new();
        let real = Failure::unchecked(FailureKind::new("Boom"), "real");
        sink.ignore_kind(API);

        sink.publish(&failing("one", &real));
        sink.publish(&failing("two", &Failure::checked(API, "ignored")));

        assert_eq!(sink.pending_failure(), Some(real));
    }

    #[test]
    fn test_failure_and_tracking_are_independent() {
        let sink = CaptureSink::new();
        let into = RecordLog::new();
        sink.set_tracking(TrackingMode::specific(into.clone(), ["one"]));
        let failure = Failure::unchecked(API, "x");

        sink.publish(&failing("one", &failure));

        assert_eq!(sink.pending_failure(), Some(failure));
        assert_eq!(into.messages(), vec!["one".to_string()]);
    }
}
