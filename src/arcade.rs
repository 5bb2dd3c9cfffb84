//! Entry point for UI shells.

use tracing::{info, instrument};

use crate::games::{LocalMultiplayerTicTacToe, Opponent, SinglePlayerTicTacToe, TimedClickSession};
use crate::profile::{Profile, ProfileError, ProfileStore};
use crate::scores::{ScoreEntry, ScoreStore};
use crate::shop::Shop;
use crate::storage::{KeyValueStore, StorageError};

/// Bundles the profile and ledger over one backing store and hands out
/// sessions wired to them.
#[derive(Debug, Clone)]
pub struct Arcade<S> {
    store: S,
    profile: ProfileStore<S>,
    scores: ScoreStore<S>,
}

impl<S: KeyValueStore + Clone> Arcade<S> {
    /// Creates an arcade over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating Arcade");
        Self {
            profile: ProfileStore::new(store.clone()),
            scores: ScoreStore::new(store.clone()),
            store,
        }
    }

    /// Profile store.
    pub fn profile(&self) -> &ProfileStore<S> {
        &self.profile
    }

    /// Score ledger.
    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    /// Shop charging this arcade's profile.
    pub fn shop(&self) -> Shop<S> {
        Shop::new(self.profile.clone())
    }

    /// Logs in as `username`.
    ///
    /// # Errors
    ///
    /// See [`ProfileStore::login`].
    #[instrument(skip(self))]
    pub fn login(&self, username: &str) -> Result<Profile, ProfileError> {
        self.profile.login(username)
    }

    /// Wipes the whole store: profile and ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.clear()?;
        info!("Logged out, store cleared");
        Ok(())
    }

    /// Leaderboard rows, newest first.
    pub fn leaderboard(&self) -> Vec<ScoreEntry> {
        self.scores.list()
    }

    /// New idle click challenge.
    pub fn click_session(&self) -> TimedClickSession<S> {
        TimedClickSession::new(self.profile.clone(), self.scores.clone())
    }

    /// New idle game against `opponent`.
    pub fn single_player<O: Opponent>(&self, opponent: O) -> SinglePlayerTicTacToe<S, O> {
        SinglePlayerTicTacToe::new(self.profile.clone(), self.scores.clone(), opponent)
    }

    /// New idle two-player game.
    pub fn multiplayer(&self) -> LocalMultiplayerTicTacToe<S> {
        LocalMultiplayerTicTacToe::new(self.profile.clone())
    }
}
