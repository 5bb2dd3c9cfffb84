//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board); nothing here mutates state.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Outcome, evaluate, winner};
