#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{logger_with_console, sink_names};
use logscope_core::{ErrorKind, Level, LevelScope, LoggerRegistry};
use std::sync::Arc;

#[test]
fn test_overlapping_capture_is_rejected() {
    let registry = LoggerRegistry::new();
    let (logger, _console) = logger_with_console(&registry, "Operator");

    let first = registry.capture("Operator").unwrap();
    let err = registry.capture("Operator").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LoggerBusy);
    assert_eq!(err.code(), "ERR_LOGGER_BUSY");
    assert_eq!(err.logger(), Some("Operator"));
    assert_eq!(err.op(), Some("capture"));

    // The rejected attempt must not have touched the first scope's state
    assert_eq!(sink_names(&logger), vec!["capture"]);
    first.revert().unwrap();
    assert_eq!(sink_names(&logger), vec!["Operator-console"]);
}

#[test]
fn test_capture_available_again_after_revert() {
    let registry = LoggerRegistry::new();

    registry.capture("Operator").unwrap().revert().unwrap();
    assert!(!registry.is_captured("Operator"));

    let again = registry.capture("Operator").unwrap();
    assert!(registry.is_captured("Operator"));
    again.revert().unwrap();
}

#[test]
fn test_different_loggers_capture_independently() {
    let registry = LoggerRegistry::new();

    let a = registry.capture("Operator").unwrap();
    let b = registry.capture("com.jayway.jsonpath").unwrap();
    assert!(registry.is_captured("Operator"));
    assert!(registry.is_captured("com.jayway.jsonpath"));

    b.revert().unwrap();
    a.revert().unwrap();
}

#[test]
fn test_level_scope_and_capture_share_the_lease() {
    let registry = LoggerRegistry::new();

    let quiet = registry.quiet("noisy").unwrap();
    let err = registry.capture("noisy").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LoggerBusy);
    assert_eq!(err.op(), Some("capture"));
    quiet.revert();

    let scope = registry.capture("noisy").unwrap();
    let err = LevelScope::new(&registry, "noisy", Level::Error).unwrap_err();
    assert_eq!(err.op(), Some("override_level"));
    scope.revert().unwrap();
}

#[test]
fn test_independent_registries_do_not_conflict() {
    let a = LoggerRegistry::new();
    let b = LoggerRegistry::new();

    let scope_a = a.capture("Operator").unwrap();
    let scope_b = b.capture("Operator").unwrap();

    assert!(!Arc::ptr_eq(scope_a.logger(), scope_b.logger()));
    scope_a.revert().unwrap();
    scope_b.revert().unwrap();
}

#[test]
fn test_quiet_uses_configured_level() {
    let config = logscope_core::HarnessConfig::from_toml_str(r#"quiet_level = "error""#).unwrap();
    let registry = LoggerRegistry::from_config(&config);
    let logger = registry.resolve("com.jayway.jsonpath");
    logger.set_level(Some(Level::Debug));

    let quiet = registry.quiet("com.jayway.jsonpath").unwrap();
    assert_eq!(logger.level(), Some(Level::Error));
    assert_eq!(quiet.original_level(), Some(Level::Debug));
    drop(quiet);

    assert_eq!(logger.level(), Some(Level::Debug));
}

#[test]
fn test_quiet_suppresses_below_level() {
    let registry = LoggerRegistry::new();
    let logger = registry.resolve("com.jayway.jsonpath");
    let log = common::attach_memory(&logger, "memory");

    let quiet = registry.quiet("com.jayway.jsonpath").unwrap();
    logger.debug("Evaluating path");
    logger.info("kept");
    quiet.revert();
    logger.debug("after");

    assert_eq!(log.messages(), vec!["kept".to_string(), "after".to_string()]);
}
