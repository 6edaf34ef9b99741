//! Contains pre-made implementations of the `Board` trait.

/// A `Board` implementation for the game of Othello.
pub mod othello;
/// Heuristic evaluation of Othello positions for minimax.
pub mod othello_heuristics;
/// A `Board` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
