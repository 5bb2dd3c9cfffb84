//! Random move selection for the automated opponent.

use crate::{Board, Cell};
use rand::Rng;
use tracing::{debug, instrument};

/// Picks one empty cell uniformly at random.
///
/// Returns `None` when the board has no empty cell. The random source is
/// supplied by the caller so tests can seed it.
#[instrument(skip(board, rng))]
pub fn choose_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Cell> {
    let empty = Cell::empty_cells(board);
    if empty.is_empty() {
        debug!("No empty cells to choose from");
        return None;
    }

    let cell = empty[rng.random_range(0..empty.len())];
    debug!(cell = %cell, choices = empty.len(), "Random move chosen");
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Square};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from([Square::Occupied(Mark::X); 9]);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(choose_move(&board, &mut rng), None);
    }

    #[test]
    fn test_single_empty_cell_is_always_chosen() {
        let mut squares = [Square::Occupied(Mark::O); 9];
        squares[Cell::BottomCenter.to_index()] = Square::Empty;
        let board = Board::from(squares);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(choose_move(&board, &mut rng), Some(Cell::BottomCenter));
        }
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let mut board = Board::new();
        board.place(Cell::Center, Mark::X).unwrap();
        board.place(Cell::TopLeft, Mark::O).unwrap();
        board.place(Cell::BottomRight, Mark::X).unwrap();

        let mut rng = SmallRng::seed_from_u64(2024);
        let mut counts = [0u32; 9];
        let draws = 60_000;
        for _ in 0..draws {
            let cell = choose_move(&board, &mut rng).unwrap();
            counts[cell.to_index()] += 1;
        }

        let expected = draws as f64 / 6.0;
        for cell in Cell::ALL {
            let count = counts[cell.to_index()];
            if board.is_empty(cell) {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.05, "{cell} chosen {count} times");
            } else {
                assert_eq!(count, 0, "occupied {cell} was chosen");
            }
        }
    }
}
