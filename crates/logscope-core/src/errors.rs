use crate::failure::Failure;
use thiserror::Error;

/// Result type alias using HarnessError
pub type Result<T> = std::result::Result<T, HarnessError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Classifies every error the harness can report while setting up a scope or
/// loading configuration. Each kind maps to a stable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration file is malformed or contains unknown fields
    InvalidConfig,
    /// A level name could not be parsed
    UnknownLevel,
    /// The logger is already held by another active scope
    LoggerBusy,
    Io,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ErrorKind::UnknownLevel => "ERR_UNKNOWN_LEVEL",
            ErrorKind::LoggerBusy => "ERR_LOGGER_BUSY",
            ErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type for harness setup
#[derive(Debug, Clone)]
pub struct HarnessError {
    kind: ErrorKind,
    op: Option<String>,
    logger: Option<String>,
    message: String,
}

impl HarnessError {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            logger: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add logger context
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the logger context, if any
    pub fn logger(&self) -> Option<&str> {
        self.logger.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn logger_busy(logger: &str, op: &str) -> Self {
        Self::new(ErrorKind::LoggerBusy)
            .with_op(op)
            .with_logger(logger)
            .with_message("logger is already captured by another scope")
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(logger) = &self.logger {
            write!(f, " (logger: {})", logger)?;
        }
        Ok(())
    }
}

impl std::error::Error for HarnessError {}

// ========== End Error Facility ==========

/// Outcome raised when a capture scope is reverted
///
/// At most one is produced per scope. A logged failure always wins over
/// leftover tracked messages.
#[derive(Error, Debug, Clone)]
pub enum ScopeFailure {
    /// A fatal or unchecked failure, raised unchanged
    #[error("{0}")]
    Logged(Failure),

    /// A checked failure, wrapped so it can be raised as unchecked
    #[error("logged failure: {cause}")]
    Wrapped {
        #[source]
        cause: Failure,
    },

    /// Tracked messages that were emitted and never cleared or untracked
    #[error("Unexpected log messages [{}]", .0.join(", "))]
    UnexpectedMessages(Vec<String>),
}

impl ScopeFailure {
    /// The logged failure behind this outcome, if any
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ScopeFailure::Logged(failure) => Some(failure),
            ScopeFailure::Wrapped { cause } => Some(cause),
            ScopeFailure::UnexpectedMessages(_) => None,
        }
    }

    /// Rendered messages for an `UnexpectedMessages` outcome
    pub fn unexpected_messages(&self) -> &[String] {
        match self {
            ScopeFailure::UnexpectedMessages(messages) => messages,
            _ => &[],
        }
    }
}
