//! Canonical schema constants for structured logging and events
//!
//! These constants keep the harness's own diagnostic events consistent.
//! `tracing` field names must be literal in the event macros, so the field
//! keys below are the names readers use to look those fields up.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_LOGGER: &str = "logger";
pub const FIELD_SCOPE_ID: &str = "scope_id";

// Capture details
pub const FIELD_SAVED_SINKS: &str = "saved_sinks";
pub const FIELD_LEVEL: &str = "level";

// Failure fields
pub const FIELD_FAILURE_KIND: &str = "failure.kind";
pub const FIELD_FAILURE_CLASS: &str = "failure.class";

// Canonical event names
pub const EVENT_CAPTURE: &str = "capture";
pub const EVENT_REVERT: &str = "revert";
pub const EVENT_REVERT_FAILURE: &str = "revert_failure";
pub const EVENT_LEVEL_OVERRIDE: &str = "level_override";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_LOGGER.is_empty());
        assert!(!EVENT_CAPTURE.is_empty());
        assert!(!EVENT_REVERT.is_empty());
        assert!(!EVENT_REVERT_FAILURE.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let names = [
            EVENT_CAPTURE,
            EVENT_REVERT,
            EVENT_REVERT_FAILURE,
            EVENT_LEVEL_OVERRIDE,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
