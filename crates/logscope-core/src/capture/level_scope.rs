//! Level-only override for noisy loggers

use crate::core_types::schema::{EVENT_LEVEL_OVERRIDE, EVENT_REVERT};
use crate::core_types::ScopeId;
use crate::errors::Result;
use crate::level::Level;
use crate::log_scope_event;
use crate::logger::LoggerRef;
use crate::registry::{Lease, LoggerRegistry};

/// Overrides a logger's level without touching its sinks
///
/// Reverting (or dropping) writes back exactly the level seen at creation,
/// including an unset one.
pub struct LevelScope {
    scope_id: ScopeId,
    logger: LoggerRef,
    original: Option<Level>,
    lease: Option<Lease>,
    reverted: bool,
}

impl LevelScope {
    /// Override `name`'s level with `level`
    ///
    /// # Errors
    ///
    /// Returns `LoggerBusy` if another scope holds the logger.
    pub fn new(registry: &LoggerRegistry, name: &str, level: Level) -> Result<Self> {
        let lease = registry.acquire(name, "override_level")?;
        let logger = registry.resolve(name);
        let original = logger.level();
        logger.set_level(Some(level));

        let scope_id = ScopeId::new();
        log_scope_event!(EVENT_LEVEL_OVERRIDE, name, scope_id, level = %level);

        Ok(Self {
            scope_id,
            logger,
            original,
            lease: Some(lease),
            reverted: false,
        })
    }

    /// Override `name`'s level with the registry's quiet level
    ///
    /// # Errors
    ///
    /// Returns `LoggerBusy` if another scope holds the logger.
    pub fn quiet(registry: &LoggerRegistry, name: &str) -> Result<Self> {
        Self::new(registry, name, registry.quiet_level())
    }

    /// The level to be restored
    pub fn original_level(&self) -> Option<Level> {
        self.original
    }

    /// The logger whose level is overridden
    pub fn logger(&self) -> &LoggerRef {
        &self.logger
    }

    /// Restore the original level and release the logger
    pub fn revert(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if self.reverted {
            return;
        }
        self.reverted = true;
        self.logger.set_level(self.original);
        self.lease.take();
        log_scope_event!(EVENT_REVERT, self.logger.name(), self.scope_id);
    }
}

impl Drop for LevelScope {
    fn drop(&mut self) {
        self.restore();
    }
}

impl std::fmt::Debug for LevelScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelScope")
            .field("scope_id", &self.scope_id)
            .field("logger", &self.logger.name())
            .field("original", &self.original)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_restores_unset_level() {
        let registry = LoggerRegistry::new();
        let scope = LevelScope::quiet(&registry, "com.jayway.jsonpath").unwrap();

        let logger = registry.resolve("com.jayway.jsonpath");
        assert_eq!(logger.level(), Some(Level::Info));
        assert_eq!(scope.original_level(), None);

        scope.revert();
        assert_eq!(logger.level(), None);
    }

    #[test]
    fn test_restores_previous_level() {
        let registry = LoggerRegistry::new();
        let logger = registry.resolve("noisy");
        logger.set_level(Some(Level::Trace));

        let scope = LevelScope::new(&registry, "noisy", Level::Error).unwrap();
        assert_eq!(logger.level(), Some(Level::Error));

        drop(scope);
        assert_eq!(logger.level(), Some(Level::Trace));
    }

    #[test]
    fn test_holds_the_logger() {
        let registry = LoggerRegistry::new();
        let scope = LevelScope::quiet(&registry, "noisy").unwrap();

        let err = LevelScope::quiet(&registry, "noisy").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LoggerBusy);

        scope.revert();
        assert!(!registry.is_captured("noisy"));
    }
}
