//! Storage core configuration.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Load that description from a JSON file or from environment variables.
//!
//! # Invariants
//! - A missing `db_path` means an in-memory database.
//! - A missing `log_level` resolves to `default_log_level()`.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "BAMYANG_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "BAMYANG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BAMYANG_LOG_DIR";

/// Errors raised while loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Storage and logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// SQLite file path. `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Parses a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Builds config from `BAMYANG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            db_path: non_blank(ENV_DB_PATH).map(PathBuf::from),
            log_level: non_blank(ENV_LOG_LEVEL),
            log_dir: non_blank(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Configured log level, or the build-mode default when unset.
    pub fn effective_log_level(&self) -> &str {
        match self.log_level.as_deref() {
            Some(level) => level,
            None => default_log_level(),
        }
    }
}
