//! Bridge from `tracing` events into a logger registry
//!
//! Installing [`RegistryLayer`] lets code instrumented with `tracing` be
//! captured like any registry logger: each event is delivered to the logger
//! named by the event's target. Targets with no logger in the registry are
//! dropped; the layer never creates loggers.
//!
//! Field mapping:
//! - `message` becomes the record message
//! - an `error` field becomes an unchecked [`Failure`], whose kind is taken
//!   from an `error.kind` field when present
//!
//! Events emitted by the harness's own crates are skipped.

use crate::failure::{Failure, FailureKind};
use crate::level::Level;
use crate::record::LogRecord;
use crate::registry::LoggerRegistry;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

const OWN_CRATES: &[&str] = &["logscope_core", "logscope_core_types", "logscope"];

fn is_own_target(target: &str) -> bool {
    OWN_CRATES.iter().any(|krate| {
        target
            .strip_prefix(krate)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

#[derive(Default)]
struct RecordVisitor {
    message: Option<String>,
    error: Option<String>,
    error_kind: Option<String>,
}

impl Visit for RecordVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{:?}", value)),
            "error" => self.error = Some(format!("{:?}", value)),
            "error.kind" => self.error_kind = Some(format!("{:?}", value)),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "error.kind" => self.error_kind = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if field.name() == "error" {
            self.error = Some(value.to_string());
        }
    }
}

/// Layer delivering `tracing` events to registry loggers
pub struct RegistryLayer {
    registry: LoggerRegistry,
}

impl RegistryLayer {
    /// Deliver events to loggers already present in `registry`
    pub fn new(registry: LoggerRegistry) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for RegistryLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if is_own_target(target) {
            return;
        }
        let Some(logger) = self.registry.get(target) else {
            return;
        };

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let mut record = LogRecord::new(
            target,
            Level::from(*metadata.level()),
            visitor.message.unwrap_or_default(),
        );
        if let Some(error) = visitor.error {
            let kind = visitor
                .error_kind
                .map(FailureKind::named)
                .unwrap_or(FailureKind::UNSPECIFIED);
            record = record.with_failure(Failure::unchecked(kind, error));
        }
        logger.log(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordLog;
    use crate::sink::MemorySink;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_event_routed_to_target_logger() {
        let registry = LoggerRegistry::new();
        let log = RecordLog::new();
        registry
            .resolve("operator::main")
            .attach_sink(MemorySink::new("memory", log.clone()).into_ref());

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "operator::main", "domain not found");
        });

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "domain not found");
        assert_eq!(records[0].level, Level::Warn);
        assert!(records[0].failure.is_none());
    }

    #[test]
    fn test_error_field_becomes_failure() {
        let registry = LoggerRegistry::new();
        let log = RecordLog::new();
        registry
            .resolve("operator::api")
            .attach_sink(MemorySink::new("memory", log.clone()).into_ref());

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let err = std::io::Error::other("connection reset");
            tracing::error!(
                target: "operator::api",
                error = &err as &(dyn std::error::Error + 'static),
                error.kind = "ApiException",
                "call failed"
            );
        });

        let records = log.records();
        assert_eq!(records.len(), 1);
        let failure = records[0].failure.as_ref().unwrap();
        assert_eq!(failure.kind().name(), "ApiException");
        assert_eq!(failure.message(), "connection reset");
    }

    #[test]
    fn test_own_events_are_skipped() {
        let registry = LoggerRegistry::new();
        let log = RecordLog::new();
        registry
            .resolve("logscope_core::capture")
            .attach_sink(MemorySink::new("memory", log.clone()).into_ref());

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "logscope_core::capture", "internal");
        });

        assert!(log.is_empty());
    }

    #[test]
    fn test_own_target_match_stops_at_crate_boundary() {
        assert!(is_own_target("logscope"));
        assert!(is_own_target("logscope::commands::exec"));
        assert!(is_own_target("logscope_core::capture::scope"));
        assert!(!is_own_target("logscope_demo::x"));
        assert!(!is_own_target("logscopes"));
    }

    #[test]
    fn test_lookalike_target_is_delivered() {
        let registry = LoggerRegistry::new();
        let log = RecordLog::new();
        registry
            .resolve("logscope_demo::x")
            .attach_sink(MemorySink::new("memory", log.clone()).into_ref());

        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "logscope_demo::x", "user event");
        });

        assert_eq!(log.messages(), vec!["user event".to_string()]);
    }

    #[test]
    fn test_unregistered_target_is_dropped() {
        let registry = LoggerRegistry::new();
        let subscriber =
            tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "hyper::client", "connected");
        });

        assert!(registry.get("hyper::client").is_none());
        assert!(registry.logger_names().is_empty());
    }
}
