//! Harness configuration loaded from TOML
//!
//! ```toml
//! quiet_level = "info"
//! report_failures = true
//!
//! [[loggers]]
//! name = "Operator"
//! level = "info"
//! console = true
//! ```

use crate::errors::{ErrorKind, HarnessError, Result};
use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "LOGSCOPE_CONFIG";

fn default_quiet_level() -> Level {
    Level::Info
}

fn default_true() -> bool {
    true
}

/// Top-level harness configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Level applied by `LevelScope::quiet` (default: info)
    #[serde(default = "default_quiet_level")]
    pub quiet_level: Level,

    /// Log the pending failure through the diagnostic facility at revert
    #[serde(default = "default_true")]
    pub report_failures: bool,

    /// Loggers to pre-create in a registry built from this config
    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            quiet_level: default_quiet_level(),
            report_failures: true,
            loggers: Vec::new(),
        }
    }
}

/// Configuration for one pre-created logger
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub name: String,

    /// Minimum level; unset publishes everything
    #[serde(default)]
    pub level: Option<Level>,

    /// Attach a stderr console sink (default: true)
    #[serde(default = "default_true")]
    pub console: bool,
}

impl HarnessConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML, contains unknown
    /// fields or names an unknown level, or if a logger name is empty.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(text).map_err(|e| {
            HarnessError::new(ErrorKind::InvalidConfig)
                .with_op("parse_config")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `InvalidConfig` as for
    /// [`HarnessConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::new(ErrorKind::Io)
                .with_op("load_config")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load the file named by `LOGSCOPE_CONFIG`, or defaults when unset
    ///
    /// # Errors
    ///
    /// Same as [`HarnessConfig::load`] when the variable is set.
    pub fn from_env() -> Result<Self> {
        match config_path_from_env() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        for (index, logger) in self.loggers.iter().enumerate() {
            if logger.name.trim().is_empty() {
                return Err(HarnessError::new(ErrorKind::InvalidConfig)
                    .with_op("validate_config")
                    .with_message(format!("logger at index {} has an empty name", index)));
            }
        }
        Ok(())
    }
}

/// `LOGSCOPE_CONFIG` as a path, if set and non-empty
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
