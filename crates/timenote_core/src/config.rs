//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, storage key and logging settings.
//! - Apply defaults when variables are unset or blank.
//!
//! # Invariants
//! - Every value is trimmed; blank values count as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, LogLevel};
use crate::repo::note_persistence::DEFAULT_STORAGE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TIMENOTE_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "TIMENOTE_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "TIMENOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TIMENOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "timenote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel { var: &'static str, value: String },
    RelativeLogDir { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel { var, value } => write!(
                f,
                "{var}: unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir { var, value } => {
                write!(f, "{var}: log directory must be absolute, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Effective application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: LogLevel,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| {
            lookup(var)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = read(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel {
                    var: ENV_LOG_LEVEL,
                    value: level.clone(),
                })?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir {
                    var: ENV_LOG_DIR,
                    value: dir,
                });
            }
            config.log_dir = Some(path);
        }

        Ok(config)
    }
}
