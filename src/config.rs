//! Runtime configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::storage::{Backend, FallbackStore, MemoryStore, SqliteStore};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "game_empire.toml";

/// Default SQLite database file name.
pub const DEFAULT_DB_PATH: &str = "game_empire.db";

/// Where durable state lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// SQLite database file.
    Sqlite {
        /// Database path.
        #[serde(default = "default_db_path")]
        path: String,
    },
    /// Keep everything in memory; nothing survives the process.
    Memory,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: default_db_path(),
        }
    }
}

#[instrument]
fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

/// Application configuration loaded from TOML.
///
/// ```toml
/// log_filter = "game_empire=debug"
///
/// [storage]
/// backend = "sqlite"
/// path = "game_empire.db"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EmpireConfig {
    /// Storage backend.
    #[serde(default)]
    storage: StorageConfig,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

impl Default for EmpireConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl EmpireConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(storage = ?config.storage, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the storage backend.
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Opens the configured backend.
    ///
    /// A database that cannot be opened does not abort startup: the store
    /// comes back already degraded to memory.
    #[instrument(skip(self), fields(storage = ?self.storage))]
    pub fn open_store(&self) -> FallbackStore<Backend> {
        match &self.storage {
            StorageConfig::Memory => FallbackStore::new(Backend::Memory(MemoryStore::new())),
            StorageConfig::Sqlite { path } => match SqliteStore::open(path.clone()) {
                Ok(store) => FallbackStore::new(Backend::Sqlite(store)),
                Err(e) => {
                    warn!(error = %e, "Storage unavailable, running in memory");
                    FallbackStore::degraded(Backend::Memory(MemoryStore::new()))
                }
            },
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_use_sqlite_file() {
        let config = EmpireConfig::default();
        assert_eq!(
            config.storage(),
            &StorageConfig::Sqlite {
                path: DEFAULT_DB_PATH.to_string()
            }
        );
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_parse_memory_backend() {
        let config: EmpireConfig = toml::from_str(
            r#"
            log_filter = "debug"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage(), &StorageConfig::Memory);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EmpireConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EmpireConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage = 12").unwrap();
        assert!(EmpireConfig::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_unopenable_database_degrades() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let config = EmpireConfig::default().with_storage(StorageConfig::Sqlite {
            path: dir.path().to_string_lossy().into_owned(),
        });
        assert!(config.open_store().is_degraded());
    }
}
