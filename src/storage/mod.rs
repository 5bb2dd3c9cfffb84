//! Durable key/value persistence for the profile and score ledger.
//!
//! Every value is UTF-8 text under a fixed string key (see [`keys`]).
//! Backends implement [`KeyValueStore`]; [`FallbackStore`] wraps any backend
//! so a failing disk degrades to in-memory defaults instead of aborting.

mod error;
mod fallback;
pub mod keys;
mod memory;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::{StorageError, StorageErrorKind};
pub use fallback::FallbackStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String-keyed text storage.
///
/// Methods take `&self`; implementations serialize access internally so a
/// store can be cloned into several owners.
pub trait KeyValueStore: std::fmt::Debug + Send + Sync {
    /// Reads a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a key. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Deletes every key.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Backend selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Process-local map.
    Memory(MemoryStore),
    /// SQLite database file.
    Sqlite(SqliteStore),
}

impl KeyValueStore for Backend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::Sqlite(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::Sqlite(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::Sqlite(store) => store.remove(key),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.clear(),
            Self::Sqlite(store) => store.clear(),
        }
    }
}
