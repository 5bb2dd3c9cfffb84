//! Play sessions.
//!
//! Each session is a small state machine moving through
//! [`Phase::Idle`] → [`Phase::Running`] → [`Phase::Ended`]. Sessions own their
//! transient state (board, timer, score) and commit rewards to the injected
//! [`ProfileStore`](crate::ProfileStore) and [`ScoreStore`](crate::ScoreStore)
//! exactly once, when they end.

mod click;
mod multiplayer;
mod opponent;
mod phase;
mod single_player;
mod ticker;

pub use click::{
    CLICK_DURATION_SECS, ClickSummary, SPEED_DEMON_THRESHOLD, TickReport, TimedClickSession,
};
pub use multiplayer::LocalMultiplayerTicTacToe;
pub use opponent::{Opponent, RandomOpponent};
pub use phase::{GameKind, MoveReport, Phase};
pub use single_player::{STRATEGIST_COINS, STRATEGIST_SCORE, SinglePlayerTicTacToe};
pub use ticker::{Ticker, drive_click_session};
