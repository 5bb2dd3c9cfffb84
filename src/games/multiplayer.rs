//! Two players sharing one board.

use empire_tictactoe::{Board, Cell, Mark, Outcome, evaluate};
use tracing::{debug, info, instrument, warn};

use super::phase::{MoveReport, Phase};
use crate::achievements::Achievement;
use crate::profile::ProfileStore;
use crate::storage::KeyValueStore;

/// Local two-player tic-tac-toe, `X` first.
///
/// No coins change hands. Any three-in-a-row, whichever mark made it,
/// unlocks "Multiplayer Winner"; a draw unlocks nothing.
#[derive(Debug)]
pub struct LocalMultiplayerTicTacToe<S> {
    profile: ProfileStore<S>,
    board: Board,
    to_move: Mark,
    phase: Phase,
    outcome: Outcome,
}

impl<S: KeyValueStore> LocalMultiplayerTicTacToe<S> {
    /// Creates an idle session.
    #[instrument(skip(profile))]
    pub fn new(profile: ProfileStore<S>) -> Self {
        Self {
            profile,
            board: Board::new(),
            to_move: Mark::X,
            phase: Phase::Idle,
            outcome: Outcome::InProgress,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Board evaluation after the last move.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Idle → Running. Returns `false` if the session was not idle.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        info!("Local multiplayer tic-tac-toe started");
        true
    }

    /// Places the current player's mark at `cell`.
    #[instrument(skip(self))]
    pub fn play(&mut self, cell: Cell) -> MoveReport {
        self.play_as(self.to_move, cell)
    }

    /// Places `mark` at `cell`; ignored when it is not `mark`'s turn.
    #[instrument(skip(self))]
    pub fn play_as(&mut self, mark: Mark, cell: Cell) -> MoveReport {
        if self.phase != Phase::Running || self.outcome.is_terminal() || mark != self.to_move {
            debug!(phase = ?self.phase, to_move = %self.to_move, "Move ignored");
            return MoveReport::Ignored;
        }
        if self.board.place(cell, mark).is_err() {
            debug!("Cell occupied, move ignored");
            return MoveReport::Ignored;
        }

        self.to_move = mark.opponent();
        self.outcome = evaluate(&self.board);
        match self.outcome {
            Outcome::Win(winner) => {
                if let Err(e) = self
                    .profile
                    .unlock_achievement(Achievement::MultiplayerWinner.name())
                {
                    warn!(error = %e, "Failed to unlock achievement");
                }
                info!(winner = %winner, "Local multiplayer game won");
                self.phase = Phase::Ended;
            }
            Outcome::Draw => {
                info!("Local multiplayer game drawn");
                self.phase = Phase::Ended;
            }
            Outcome::InProgress => {}
        }

        MoveReport::Accepted {
            outcome: self.outcome,
            reply: None,
        }
    }
}
