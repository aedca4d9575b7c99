//! Canonical diagnostic macros
//!
//! These macros give every harness lifecycle event the same shape:
//! `component`, `event`, `logger` and `scope_id`, plus extra fields.

/// Log a scope lifecycle event at debug level
///
/// # Example
///
/// ```
/// # use logscope_core::log_scope_event;
/// # use logscope_core::core_types::{schema::EVENT_CAPTURE, ScopeId};
/// let scope_id = ScopeId::new();
/// log_scope_event!(EVENT_CAPTURE, "Operator", scope_id);
/// log_scope_event!(EVENT_CAPTURE, "Operator", scope_id, saved_sinks = 2usize);
/// ```
#[macro_export]
macro_rules! log_scope_event {
    ($event:expr, $logger:expr, $scope_id:expr) => {
        tracing::debug!(
            component = module_path!(),
            event = $event,
            logger = $logger,
            scope_id = %$scope_id,
        );
    };
    ($event:expr, $logger:expr, $scope_id:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            event = $event,
            logger = $logger,
            scope_id = %$scope_id,
            $($field)*
        );
    };
}

/// Log the failure a scope is about to raise
///
/// # Example
///
/// ```
/// # use logscope_core::log_scope_failure;
/// # use logscope_core::core_types::ScopeId;
/// # use logscope_core::{Failure, FailureKind};
/// let failure = Failure::unchecked(FailureKind::new("ApiException"), "409");
/// log_scope_failure!("Operator", ScopeId::new(), failure);
/// ```
#[macro_export]
macro_rules! log_scope_failure {
    ($logger:expr, $scope_id:expr, $failure:expr) => {{
        let failure: &$crate::Failure = &$failure;
        tracing::error!(
            component = module_path!(),
            event = $crate::core_types::schema::EVENT_REVERT_FAILURE,
            logger = $logger,
            scope_id = %$scope_id,
            failure.kind = %failure.kind(),
            failure.class = failure.class().as_str(),
            "{}",
            failure
        );
    }};
}
