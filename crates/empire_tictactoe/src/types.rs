//! Core domain types for tic-tac-toe.

use super::cell::Cell;
use derive_more::{Display, Error};
use tracing::instrument;

/// Mark placed on the board.
///
/// `X` always opens; in single-player games it belongs to the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mark {
    /// Opening mark.
    X,
    /// Second mark.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

/// Error returned when a mark cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Cell),
}

/// 3x3 tic-tac-toe board.
///
/// Squares can only go from empty to occupied: there is no way to clear a
/// cell once marked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.squares[cell.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Places `mark` into an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, cell: Cell, mark: Mark) -> Result<(), PlaceError> {
        if !self.is_empty(cell) {
            return Err(PlaceError::CellOccupied(cell));
        }
        self.squares[cell.to_index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Square::Empty).count()
    }

    /// Formats the board as a human-readable grid, empty cells shown by
    /// their keypad number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<[Square; 9]> for Board {
    fn from(squares: [Square; 9]) -> Self {
        Self { squares }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_into_empty_cell() {
        let mut board = Board::new();
        board.place(Cell::Center, Mark::X).unwrap();
        assert_eq!(board.get(Cell::Center), Square::Occupied(Mark::X));
        assert_eq!(board.empty_count(), 8);
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::new();
        board.place(Cell::Center, Mark::X).unwrap();
        let err = board.place(Cell::Center, Mark::O).unwrap_err();
        assert_eq!(err, PlaceError::CellOccupied(Cell::Center));
        assert_eq!(board.get(Cell::Center), Square::Occupied(Mark::X));
    }

    #[test]
    fn test_display_shows_keypad_numbers() {
        let mut board = Board::new();
        board.place(Cell::TopLeft, Mark::X).unwrap();
        board.place(Cell::BottomRight, Mark::O).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|O");
    }
}
