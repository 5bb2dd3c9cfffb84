//! Pure tic-tac-toe logic for the Game Empire arcade.
//!
//! - [`Board`] holds nine [`Square`]s addressed by [`Cell`]; marks can only be
//!   placed into empty cells.
//! - [`evaluate`] reports the board's [`Outcome`].
//! - [`choose_move`] picks a uniformly random empty cell from an injected
//!   random source.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cell;
mod mover;
pub mod rules;
mod types;

pub use cell::Cell;
pub use mover::choose_move;
pub use rules::{LINES, Outcome, evaluate, is_draw, is_full, winner};
pub use types::{Board, Mark, PlaceError, Square};
