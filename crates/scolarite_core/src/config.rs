//! Runtime configuration for console front ends.
//!
//! Values come from `SCOLARITE_*` environment variables; front ends apply
//! their own overrides (CLI flags, bridge arguments) on top.

use crate::console::feedback::DEFAULT_FEEDBACK_TTL;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "SCOLARITE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SCOLARITE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SCOLARITE_LOG_DIR";
pub const ENV_FEEDBACK_TTL_MS: &str = "SCOLARITE_FEEDBACK_TTL_MS";

const DEFAULT_DB_FILE: &str = "scolarite.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but blank.
    Empty { key: &'static str },
    InvalidNumber { key: &'static str, value: String },
    /// Log directories must be absolute.
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { key } => write!(f, "`{key}` is set but empty"),
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a non-negative integer, got `{value}`")
            }
            Self::RelativeLogDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub feedback_ttl_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
            feedback_ttl_ms: DEFAULT_FEEDBACK_TTL.as_millis() as u64,
        }
    }
}

impl ConsoleConfig {
    /// Reads the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through `lookup`; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_empty(&lookup, ENV_DB_PATH)? {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_LEVEL)? {
            config.log_level = value;
        }
        if let Some(value) = non_empty(&lookup, ENV_LOG_DIR)? {
            config.log_dir = Some(absolute_dir(PathBuf::from(value))?);
        }
        if let Some(value) = non_empty(&lookup, ENV_FEEDBACK_TTL_MS)? {
            config.feedback_ttl_ms =
                value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: ENV_FEEDBACK_TTL_MS,
                        value,
                    })?;
        }

        Ok(config)
    }

    /// Replaces the log directory, enforcing the same rule as the env var.
    pub fn with_log_dir(mut self, dir: PathBuf) -> ConfigResult<Self> {
        self.log_dir = Some(absolute_dir(dir)?);
        Ok(self)
    }

    pub fn feedback_ttl(&self) -> Duration {
        Duration::from_millis(self.feedback_ttl_ms)
    }
}

fn non_empty<F>(lookup: &F, key: &'static str) -> ConfigResult<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

fn absolute_dir(dir: PathBuf) -> ConfigResult<PathBuf> {
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Err(ConfigError::RelativeLogDir(dir))
    }
}
