//! Failure values attached to log records
//!
//! A `Failure` is what a logger records alongside a message when something
//! went wrong. Each failure carries an explicit [`FailureKind`] tag used for
//! category suppression and a [`FailureClass`] deciding how it is raised when
//! a capture scope closes.
//!
//! Failures are compared by identity: two failures are equal only if one is a
//! clone of the other. This is what instance suppression matches on.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Named failure category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FailureKind(Cow<'static, str>);

impl FailureKind {
    /// Kind used when a failure arrives without one
    pub const UNSPECIFIED: FailureKind = FailureKind::new("error");

    /// Create a kind from a static name, usable in constants
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a kind from a runtime name
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a failure is raised at scope close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Unrecoverable defect; raised unchanged
    Fatal,
    /// Runtime failure; raised unchanged
    Unchecked,
    /// Anything else; wrapped in a generic unchecked failure
    Checked,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Fatal => "fatal",
            FailureClass::Unchecked => "unchecked",
            FailureClass::Checked => "checked",
        }
    }
}

struct FailureInner {
    kind: FailureKind,
    class: FailureClass,
    message: String,
    cause: Option<Arc<dyn StdError + Send + Sync>>,
}

/// A failure value with identity semantics
#[derive(Clone)]
pub struct Failure {
    inner: Arc<FailureInner>,
}

impl Failure {
    /// Create a failure of the given kind and class
    pub fn new(kind: FailureKind, class: FailureClass, message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(FailureInner {
                kind,
                class,
                message: message.into(),
                cause: None,
            }),
        }
    }

    /// Create an unrecoverable-defect failure
    pub fn fatal(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::new(kind, FailureClass::Fatal, message)
    }

    /// Create a runtime failure
    pub fn unchecked(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::new(kind, FailureClass::Unchecked, message)
    }

    /// Create a checked failure
    pub fn checked(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::new(kind, FailureClass::Checked, message)
    }

    /// Wrap an existing error; the message is taken from its `Display`
    pub fn from_error<E>(kind: FailureKind, class: FailureClass, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(FailureInner {
                kind,
                class,
                message: error.to_string(),
                cause: Some(Arc::new(error)),
            }),
        }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.inner.kind
    }

    pub fn class(&self) -> FailureClass {
        self.inner.class
    }

    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// True if both handles refer to the same failure instance
    pub fn same_instance(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for Failure {}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &self.inner.kind)
            .field("class", &self.inner.class)
            .field("message", &self.inner.message)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.kind)?;
        if !self.inner.message.is_empty() {
            write!(f, ": {}", self.inner.message)?;
        }
        Ok(())
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API: FailureKind = FailureKind::new("ApiException");

    #[test]
    fn test_identity_equality() {
        let a = Failure::checked(API, "not found");
        let b = Failure::checked(API, "not found");

        assert_eq!(a, a.clone());
        assert_ne!(a, b, "equal content is not the same instance");
    }

    #[test]
    fn test_display() {
        let failure = Failure::unchecked(API, "boom");
        assert_eq!(failure.to_string(), "ApiException: boom");

        let bare = Failure::fatal(FailureKind::named("OutOfMemory"), "");
        assert_eq!(bare.to_string(), "OutOfMemory");
    }

    #[test]
    fn test_from_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let failure = Failure::from_error(FailureKind::new("io"), FailureClass::Checked, io);

        assert_eq!(failure.message(), "missing file");
        assert!(failure.source().is_some());
    }

    #[test]
    fn test_named_kind_matches_static_kind() {
        assert_eq!(FailureKind::named("ApiException"), API);
    }
}
