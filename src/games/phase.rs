//! Shared session vocabulary.

use empire_tictactoe::{Cell, Outcome};

/// Lifecycle of a session. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, waiting for `start`.
    #[default]
    Idle,
    /// Accepting input.
    Running,
    /// Finished; construct a new session to play again.
    Ended,
}

/// Game name recorded in the score ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum GameKind {
    /// Timed click challenge.
    Click,
    /// Tic-tac-toe against the AI.
    TicTacToe,
}

/// Result of submitting a tic-tac-toe move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReport {
    /// Occupied cell, finished board, wrong turn or session not running.
    /// Nothing changed.
    Ignored,
    /// The mark was placed.
    Accepted {
        /// Board state after the move (and any automatic reply).
        outcome: Outcome,
        /// Cell the automated opponent answered with, if it moved.
        reply: Option<Cell>,
    },
}

impl MoveReport {
    /// True unless the move was ignored.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Outcome after an accepted move.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Ignored => None,
            Self::Accepted { outcome, .. } => Some(*outcome),
        }
    }
}
