//! Game Empire - mini-game arcade with durable progress
//!
//! A click challenge and two tic-tac-toe variants that pay coins, unlock
//! achievements and post to a bounded leaderboard, all persisted in a
//! key/value store.
//!
//! # Architecture
//!
//! - **Storage**: [`KeyValueStore`] backends (SQLite via diesel, memory) and
//!   a [`FallbackStore`] that degrades to memory on failure
//! - **Profile**: [`ProfileStore`] for identity, coins, achievements, theme
//!   and sound
//! - **Scores**: [`ScoreStore`], newest-first ledger capped at
//!   [`LEDGER_CAPACITY`]
//! - **Games**: session state machines committing results on completion
//! - **Arcade**: [`Arcade`] wiring everything to one store
//!
//! # Example
//!
//! ```
//! use game_empire::{Arcade, Cell, MemoryStore, RandomOpponent};
//!
//! let arcade = Arcade::new(MemoryStore::new());
//! arcade.login("ada").unwrap();
//!
//! let mut game = arcade.single_player(RandomOpponent::seeded(1));
//! game.start();
//! game.play(Cell::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod achievements;
mod arcade;
mod config;
mod games;
mod profile;
mod scores;
mod shop;
mod storage;

// Crate-level exports - Storage
pub use storage::{
    Backend, FallbackStore, KeyValueStore, MemoryStore, SqliteStore, StorageError,
    StorageErrorKind, keys,
};

// Crate-level exports - Profile and ledger
pub use achievements::Achievement;
pub use profile::{Profile, ProfileError, ProfileStore, Theme};
pub use scores::{LEDGER_CAPACITY, ScoreEntry, ScoreStore};
pub use shop::{Shop, ShopItem};

// Crate-level exports - Sessions
pub use games::{
    CLICK_DURATION_SECS, ClickSummary, GameKind, LocalMultiplayerTicTacToe, MoveReport, Opponent,
    Phase, RandomOpponent, SPEED_DEMON_THRESHOLD, STRATEGIST_COINS, STRATEGIST_SCORE,
    SinglePlayerTicTacToe, TickReport, Ticker, TimedClickSession, drive_click_session,
};

// Crate-level exports - Configuration and facade
pub use arcade::Arcade;
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_DB_PATH, EmpireConfig, StorageConfig};

// Crate-level exports - Board types
pub use empire_tictactoe::{Board, Cell, Mark, Outcome, Square};
