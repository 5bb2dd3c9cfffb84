//! Automated tic-tac-toe opponents.

use empire_tictactoe::{Board, Cell, choose_move};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Picks the automated player's next cell.
pub trait Opponent {
    /// Returns a cell to mark, or `None` when it cannot move.
    fn choose(&mut self, board: &Board) -> Option<Cell>;
}

/// Opponent that marks a uniformly random empty cell.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R> {
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    /// Uses `rng` as the random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOpponent<SmallRng> {
    /// Seeds from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Deterministic opponent for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Opponent for RandomOpponent<R> {
    #[instrument(skip(self, board))]
    fn choose(&mut self, board: &Board) -> Option<Cell> {
        choose_move(board, &mut self.rng)
    }
}

impl<O: Opponent + ?Sized> Opponent for Box<O> {
    fn choose(&mut self, board: &Board) -> Option<Cell> {
        (**self).choose(board)
    }
}
