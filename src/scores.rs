//! Bounded newest-first ledger of finished sessions.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::storage::{KeyValueStore, StorageError, keys};

/// Maximum number of entries kept in the ledger.
pub const LEDGER_CAPACITY: usize = 20;

/// One finished session's result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct ScoreEntry {
    /// Player who earned the score.
    #[serde(rename = "user")]
    username: String,
    /// Game the score belongs to.
    #[serde(rename = "game")]
    game_name: String,
    /// Points earned.
    score: u64,
}

impl std::fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.username, self.game_name, self.score)
    }
}

/// Reads and appends to the persisted score ledger.
#[derive(Debug, Clone)]
pub struct ScoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    /// Creates a score store over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        debug!("Creating ScoreStore");
        Self { store }
    }

    /// Prepends `entry` and truncates to [`LEDGER_CAPACITY`].
    ///
    /// Entries without a username are dropped: anonymous sessions never
    /// reach the leaderboard. Returns whether the entry was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the ledger cannot be read or written.
    /// Nothing is written when the read fails.
    #[instrument(
        skip(self, entry),
        fields(user = %entry.username, game = %entry.game_name, score = entry.score)
    )]
    pub fn record(&self, entry: ScoreEntry) -> Result<bool, StorageError> {
        if entry.username.trim().is_empty() {
            debug!("Anonymous score not recorded");
            return Ok(false);
        }

        let mut ledger = self.stored_ledger()?;
        ledger.insert(0, entry);
        ledger.truncate(LEDGER_CAPACITY);

        let raw = serde_json::to_string(&ledger)
            .map_err(|e| StorageError::encoding(format!("Failed to encode ledger: {}", e)))?;
        self.store.set(keys::SCORES, &raw)?;
        info!(len = ledger.len(), "Score recorded");
        Ok(true)
    }

    /// Ledger entries, newest first. Empty when missing, unreadable or
    /// corrupt.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<ScoreEntry> {
        self.stored_ledger().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read ledger, using empty");
            Vec::new()
        })
    }

    /// Stored ledger. Corrupt JSON reads as empty; a failed read is an error.
    fn stored_ledger(&self) -> Result<Vec<ScoreEntry>, StorageError> {
        let Some(raw) = self.store.get(keys::SCORES)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<ScoreEntry>>(&raw) {
            Ok(mut ledger) => {
                ledger.truncate(LEDGER_CAPACITY);
                Ok(ledger)
            }
            Err(e) => {
                warn!(error = %e, "Corrupt ledger, using empty");
                Ok(Vec::new())
            }
        }
    }

    /// Removes the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the key cannot be removed.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(keys::SCORES)?;
        info!("Ledger cleared");
        Ok(())
    }
}
