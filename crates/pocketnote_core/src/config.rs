//! Core session configuration.
//!
//! # Responsibility
//! - Describe where the store database and logs live.
//! - Bootstrap logging and the SQLite store for one session.
//!
//! # Invariants
//! - `data_dir` is absolute; the database and log directory live beneath it.

use crate::db::{open_db, DbError};
use crate::logging::{default_log_level, init_logging, normalize_level};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// File name of the store database inside `data_dir`.
pub const DB_FILE_NAME: &str = "pocketnote.sqlite3";
/// Log directory name inside `data_dir`.
pub const LOG_DIR_NAME: &str = "logs";

/// Errors raised while validating config or opening a session.
#[derive(Debug)]
pub enum ConfigError {
    /// Data directory is empty or relative.
    InvalidDataDir(PathBuf),
    /// Log level is not recognized.
    InvalidLogLevel(String),
    /// Data directory could not be created.
    Io(std::io::Error),
    /// Logging could not be initialized.
    Logging(String),
    /// Store database could not be opened.
    Db(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDataDir(path) => {
                write!(f, "data_dir must be an absolute path, got `{}`", path.display())
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::Io(err) => write!(f, "failed to prepare data_dir: {err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Per-session core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CoreConfig {
    /// Config rooted at `data_dir` with the build-mode default log level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() || !self.data_dir.is_absolute() {
            return Err(ConfigError::InvalidDataDir(self.data_dir.clone()));
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

/// Validates `config`, starts logging and opens the migrated store
/// database.
pub fn open_store(config: &CoreConfig) -> Result<Connection, ConfigError> {
    config.validate()?;
    std::fs::create_dir_all(&config.data_dir).map_err(ConfigError::Io)?;
    init_logging(&config.log_level, config.log_dir()).map_err(ConfigError::Logging)?;

    let conn = open_db(config.db_path())?;
    info!(
        "event=store_open module=config status=ok db_path={}",
        config.db_path().display()
    );
    Ok(conn)
}
