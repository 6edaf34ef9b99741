use crate::board::{Board, GameOutcome};
use std::collections::VecDeque;

/// Represents a single node in the Monte Carlo search tree.
///
/// Each node stores the state of the game, statistics about the outcomes of simulations,
/// and information about the move that led to this state. Links to the parent and the children
/// live in the surrounding `ego_tree::Tree`, not in the node itself.
#[derive(Debug, Clone)]
pub struct MctsNode<T: Board> {
    /// The depth of the node in the tree. The root has height 0.
    pub height: u32,
    /// The game state that this node represents.
    pub board: T,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<T::Move>,
    /// The player whose turn it is in this node's game state.
    pub player: T::Player,
    /// Cached `board.is_terminal()`.
    pub is_terminal: bool,
    /// Legal moves that have not been expanded into children yet, in the order the board
    /// reported them. Always empty for terminal states.
    pub untried_moves: VecDeque<T::Move>,
    /// The number of simulations that passed through this node.
    pub visits: u32,
    /// Simulations credited to this node as wins.
    pub wins: u32,
    /// Simulations credited to this node as losses.
    pub loses: u32,
}

impl<T: Board> MctsNode<T> {
    /// Creates a root node for the given board.
    pub fn new(board: T) -> Self {
        let player = board.get_current_player();
        let is_terminal = board.is_terminal();
        let untried_moves = if is_terminal {
            VecDeque::new()
        } else {
            board.get_available_moves().into()
        };
        MctsNode {
            height: 0,
            board,
            prev_move: None,
            player,
            is_terminal,
            untried_moves,
            visits: 0,
            wins: 0,
            loses: 0,
        }
    }

    /// Creates a node reached from a parent at `parent_height` by playing `b_move`.
    pub fn new_child(board: T, b_move: T::Move, parent_height: u32) -> Self {
        let mut node = MctsNode::new(board);
        node.prev_move = Some(b_move);
        node.height = parent_height + 1;
        node
    }

    /// Records one simulation outcome.
    pub fn record(&mut self, outcome: GameOutcome) {
        self.visits += 1;
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Lose => self.loses += 1,
            GameOutcome::Draw => {}
        }
    }

    /// Simulations that ended neither as a win nor as a loss.
    pub fn draws(&self) -> u32 {
        self.visits - self.wins - self.loses
    }

    /// Net result of the simulations, `wins - loses`.
    pub fn score(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.loses)
    }

    /// A node is fully expanded once every legal move has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Calculates the win rate of this node.
    pub fn wins_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            (self.wins as f64) / (self.visits as f64)
        }
    }

    /// Calculates the draw rate of this node.
    pub fn draws_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            (self.draws() as f64) / (self.visits as f64)
        }
    }

    /// Upper Confidence Bound of this node as a child of a node visited `parent_visits` times.
    ///
    /// Unvisited nodes score `f64::INFINITY`, which also keeps `ln(0)` out of the formula.
    pub fn ucb_value(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 || parent_visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        (self.score() as f64) / visits
            + exploration_constant * f64::sqrt(2.0 * f64::ln(parent_visits as f64) / visits)
    }
}
