//! Win detection logic for tic-tac-toe.

use super::draw::is_full;
use crate::{Board, Cell, Mark, Square};
use tracing::instrument;

/// The eight winning triples, rows first, then columns, then diagonals.
pub const LINES: [[Cell; 3]; 8] = [
    // Rows
    [Cell::TopLeft, Cell::TopCenter, Cell::TopRight],
    [Cell::MiddleLeft, Cell::Center, Cell::MiddleRight],
    [Cell::BottomLeft, Cell::BottomCenter, Cell::BottomRight],
    // Columns
    [Cell::TopLeft, Cell::MiddleLeft, Cell::BottomLeft],
    [Cell::TopCenter, Cell::Center, Cell::BottomCenter],
    [Cell::TopRight, Cell::MiddleRight, Cell::BottomRight],
    // Diagonals
    [Cell::TopLeft, Cell::Center, Cell::BottomRight],
    [Cell::TopRight, Cell::Center, Cell::BottomLeft],
];

/// Terminal state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No triple yet and at least one empty cell.
    InProgress,
    /// A triple of the given mark exists.
    Win(Mark),
    /// Every cell is filled and no triple exists.
    Draw,
}

impl Outcome {
    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(mark) => write!(f, "Winner: {}", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Returns the mark of the first completed triple, scanning [`LINES`] in
/// order, or `None` when no triple is complete.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        let sq = board.get(a);
        if let Square::Occupied(mark) = sq
            && sq == board.get(b)
            && sq == board.get(c)
        {
            return Some(mark);
        }
    }

    None
}

/// Evaluates the board: a win takes precedence over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    match winner(board) {
        Some(mark) => Outcome::Win(mark),
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}
