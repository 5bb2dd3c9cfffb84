//! Tic-tac-toe against the automated opponent.

use empire_tictactoe::{Board, Cell, Mark, Outcome, evaluate};
use tracing::{debug, info, instrument, warn};

use super::opponent::Opponent;
use super::phase::{GameKind, MoveReport, Phase};
use crate::achievements::Achievement;
use crate::profile::ProfileStore;
use crate::scores::{ScoreEntry, ScoreStore};
use crate::storage::KeyValueStore;

/// Coins paid for beating the AI.
pub const STRATEGIST_COINS: i64 = 25;

/// Ledger score recorded for beating the AI.
pub const STRATEGIST_SCORE: u64 = 50;

/// Human plays `X`, the opponent answers with `O` after every human move.
///
/// Only a human win pays out. Losing to the AI or drawing ends the session
/// with nothing committed.
#[derive(Debug)]
pub struct SinglePlayerTicTacToe<S, O> {
    profile: ProfileStore<S>,
    scores: ScoreStore<S>,
    opponent: O,
    board: Board,
    to_move: Mark,
    phase: Phase,
    outcome: Outcome,
}

impl<S: KeyValueStore, O: Opponent> SinglePlayerTicTacToe<S, O> {
    /// Human mark.
    pub const HUMAN: Mark = Mark::X;

    /// Automated opponent's mark.
    pub const AI: Mark = Mark::O;

    /// Creates an idle session.
    #[instrument(skip_all)]
    pub fn new(profile: ProfileStore<S>, scores: ScoreStore<S>, opponent: O) -> Self {
        Self {
            profile,
            scores,
            opponent,
            board: Board::new(),
            to_move: Self::HUMAN,
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
        info!("Single-player tic-tac-toe started");
        true
    }

    /// Places the human's mark at `cell`, then lets the opponent reply.
    #[instrument(skip(self))]
    pub fn play(&mut self, cell: Cell) -> MoveReport {
        self.play_as(Self::HUMAN, cell)
    }

    /// Places `mark` at `cell` if it is that mark's turn and the human is
    /// the one moving. Anything else is ignored.
    #[instrument(skip(self))]
    pub fn play_as(&mut self, mark: Mark, cell: Cell) -> MoveReport {
        if self.phase != Phase::Running
            || self.outcome.is_terminal()
            || mark != Self::HUMAN
            || mark != self.to_move
        {
            debug!(phase = ?self.phase, to_move = %self.to_move, "Move ignored");
            return MoveReport::Ignored;
        }
        if self.board.place(cell, mark).is_err() {
            debug!("Cell occupied, move ignored");
            return MoveReport::Ignored;
        }

        self.outcome = evaluate(&self.board);
        if self.outcome == Outcome::Win(Self::HUMAN) {
            self.reward();
        }
        if self.outcome.is_terminal() {
            self.finish();
            return MoveReport::Accepted {
                outcome: self.outcome,
                reply: None,
            };
        }

        self.to_move = Self::AI;
        let reply = self.opponent_turn();
        MoveReport::Accepted {
            outcome: self.outcome,
            reply,
        }
    }

    /// Lets the opponent mark one cell and hands the turn back.
    fn opponent_turn(&mut self) -> Option<Cell> {
        let reply = match self.opponent.choose(&self.board) {
            Some(cell) => match self.board.place(cell, Self::AI) {
                Ok(()) => Some(cell),
                Err(e) => {
                    warn!(error = %e, "Opponent chose an occupied cell");
                    None
                }
            },
            None => {
                debug!("Opponent has no move");
                None
            }
        };

        self.to_move = Self::HUMAN;
        self.outcome = evaluate(&self.board);
        if self.outcome.is_terminal() {
            self.finish();
        }
        reply
    }

    fn finish(&mut self) {
        self.phase = Phase::Ended;
        info!(outcome = %self.outcome, "Single-player tic-tac-toe finished");
    }

    fn reward(&self) {
        if let Err(e) = self.profile.add_coins(STRATEGIST_COINS) {
            warn!(error = %e, "Failed to award coins");
        }

        let username = self.profile.username().unwrap_or_default();
        let entry = ScoreEntry::new(username, GameKind::TicTacToe.to_string(), STRATEGIST_SCORE);
        if let Err(e) = self.scores.record(entry) {
            warn!(error = %e, "Failed to record score");
        }

        if let Err(e) = self.profile.unlock_achievement(Achievement::Strategist.name()) {
            warn!(error = %e, "Failed to unlock achievement");
        }
        info!(coins = STRATEGIST_COINS, "Human beat the AI");
    }
}
