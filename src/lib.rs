//! Monte Carlo tree search and alpha-beta minimax for two-player board games.
//!
//! Both engines are generic over the [`Board`](board::Board) trait, so any deterministic,
//! perfect-information, turn-based game can be searched once it implements it. Each call builds
//! its own search structures and throws them away afterwards; nothing is shared between calls.
//!
//! # Example
//!
//! ```rust
//! use game_search::board::Board;
//! use game_search::boards::othello::OthelloBoard;
//! use game_search::boards::othello_heuristics::evaluate_custom;
//! use game_search::mcts::MonteCarloTreeSearch;
//! use game_search::minimax::{minimax_move, SearchDepth};
//! use game_search::random::SeededRandomGenerator;
//!
//! let board = OthelloBoard::default();
//!
//! // Monte Carlo tree search with a reproducible random generator
//! let mut mcts = MonteCarloTreeSearch::builder(board.clone())
//!     .with_random_generator(SeededRandomGenerator::new(42))
//!     .with_iterations(200)
//!     .build();
//! let tree_move = mcts.choose_move().unwrap();
//!
//! // Alpha-beta search, four plies deep
//! let alpha_beta_move = minimax_move(&board, SearchDepth::Plies(4), evaluate_custom).unwrap();
//!
//! assert!(board.get_available_moves().contains(&tree_move));
//! assert!(board.get_available_moves().contains(&alpha_beta_move));
//! ```

/// Contains the `Board` trait and the `GameOutcome` enum that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait.
pub mod boards;
/// Errors returned when no move can be chosen.
pub mod error;
/// Static evaluation of positions for minimax.
pub mod evaluator;
/// The `MonteCarloTreeSearch` engine.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Depth-limited minimax with alpha-beta pruning.
pub mod minimax;
/// Contains traits and implementations for random number generation.
pub mod random;

#[cfg(test)]
mod test_games;

pub use error::SearchError;
