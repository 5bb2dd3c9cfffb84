//! SQLite-backed key/value store.

use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::storage::{KeyValueStore, StorageError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Row of the `kv_entries` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct KvEntry {
    entry_key: String,
    entry_value: String,
}

/// Key/value store persisted in a single SQLite table.
///
/// Opens a fresh connection per operation, so clones can be handed to any
/// number of stores without sharing a connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// Each operation reconnects, so `":memory:"` would lose the table
    /// between calls; use [`MemoryStore`](crate::MemoryStore) instead.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StorageError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::unavailable(format!("Failed to run migrations: {}", e)))?;
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::unavailable(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection()?;
        let value = schema::kv_entries::table
            .find(key)
            .select(schema::kv_entries::entry_value)
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = value.is_some(), "Key read");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let entry = KvEntry::new(key.to_string(), value.to_string());
        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut conn)?;
        debug!("Key written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_entries::table.find(key)).execute(&mut conn)?;
        debug!(removed, "Key removed");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_entries::table).execute(&mut conn)?;
        info!(removed, "Store cleared");
        Ok(())
    }
}
