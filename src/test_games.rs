//! Small explicit game trees with known payoffs, for exercising the engines in tests.

use crate::board::Board;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::rc::Rc;

#[derive(Debug)]
enum Position {
    /// Finished game; the payoff is seen from player 0.
    Leaf(f64),
    /// Position in progress with a static estimate (from player 0) and its successors.
    Inner { estimate: f64, children: Vec<usize> },
}

/// A game given as an explicit tree. Player 0 moves at even plies, player 1 at odd plies.
/// Moves are child positions, `0..branching`.
#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    positions: Rc<Vec<Position>>,
    index: usize,
    ply: u32,
}

impl TreeGame {
    fn position(&self) -> &Position {
        &self.positions[self.index]
    }

    /// The payoff or estimate from player 0's side.
    pub(crate) fn value(&self) -> f64 {
        match self.position() {
            Position::Leaf(payoff) => *payoff,
            Position::Inner { estimate, .. } => *estimate,
        }
    }

    /// Root with one max choice per leaf pair: `[a, b, c, d]` becomes `max(min(a, b), min(c, d))`.
    pub(crate) fn two_ply(payoffs: [f64; 4]) -> Self {
        let positions = vec![
            Position::Inner { estimate: 0.0, children: vec![1, 2] },
            Position::Inner { estimate: 0.0, children: vec![3, 4] },
            Position::Inner { estimate: 0.0, children: vec![5, 6] },
            Position::Leaf(payoffs[0]),
            Position::Leaf(payoffs[1]),
            Position::Leaf(payoffs[2]),
            Position::Leaf(payoffs[3]),
        ];
        Self::from_positions(positions)
    }

    /// Root with exactly one legal move, which ends the game with `payoff`.
    pub(crate) fn single_move(payoff: f64) -> Self {
        let positions = vec![
            Position::Inner { estimate: 0.0, children: vec![1] },
            Position::Leaf(payoff),
        ];
        Self::from_positions(positions)
    }

    /// Full tree of the given depth where every leaf pays `payoff`.
    pub(crate) fn uniform(depth: u32, branching: usize, payoff: f64) -> Self {
        let mut positions = Vec::new();
        build_uniform(&mut positions, depth, branching, payoff);
        Self::from_positions(positions)
    }

    /// Non-terminal root that reports no moves.
    pub(crate) fn broken() -> Self {
        Self::from_positions(vec![Position::Inner { estimate: 0.0, children: vec![] }])
    }

    /// Random tree with integer payoffs in `-20..=20`. Interior estimates are the minimum of the
    /// leaves below, so they never overestimate a position for player 0.
    pub(crate) fn random(seed: u64, max_depth: u32, max_branching: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut positions = Vec::new();
        build_random(&mut positions, &mut rng, max_depth, max_branching);
        Self::from_positions(positions)
    }

    fn from_positions(positions: Vec<Position>) -> Self {
        Self {
            positions: Rc::new(positions),
            index: 0,
            ply: 0,
        }
    }
}

fn build_uniform(positions: &mut Vec<Position>, depth: u32, branching: usize, payoff: f64) -> usize {
    let index = positions.len();
    if depth == 0 {
        positions.push(Position::Leaf(payoff));
        return index;
    }
    positions.push(Position::Inner { estimate: 0.0, children: vec![] });
    let children: Vec<usize> = (0..branching)
        .map(|_| build_uniform(positions, depth - 1, branching, payoff))
        .collect();
    positions[index] = Position::Inner { estimate: 0.0, children };
    index
}

fn build_random(
    positions: &mut Vec<Position>,
    rng: &mut ChaCha8Rng,
    depth: u32,
    max_branching: usize,
) -> (usize, f64) {
    let index = positions.len();
    if depth == 0 || (index > 0 && rng.random_range(0..5) == 0) {
        let payoff = f64::from(rng.random_range(-20i32..=20));
        positions.push(Position::Leaf(payoff));
        return (index, payoff);
    }
    positions.push(Position::Inner { estimate: 0.0, children: vec![] });
    let branching = rng.random_range(1..=max_branching);
    let mut children = Vec::with_capacity(branching);
    let mut lowest = f64::INFINITY;
    for _ in 0..branching {
        let (child, low) = build_random(positions, rng, depth - 1, max_branching);
        children.push(child);
        lowest = lowest.min(low);
    }
    positions[index] = Position::Inner { estimate: lowest, children };
    (index, lowest)
}

impl Board for TreeGame {
    type Move = usize;
    type Player = u8;

    fn get_current_player(&self) -> u8 {
        (self.ply % 2) as u8
    }

    fn is_terminal(&self) -> bool {
        matches!(self.position(), Position::Leaf(_))
    }

    fn get_available_moves(&self) -> Vec<usize> {
        match self.position() {
            Position::Leaf(_) => Vec::new(),
            Position::Inner { children, .. } => (0..children.len()).collect(),
        }
    }

    fn next_state(&self, b_move: &usize) -> Self {
        let index = match self.position() {
            Position::Inner { children, .. } => children[*b_move],
            Position::Leaf(_) => panic!("no moves from a finished game"),
        };
        Self {
            positions: Rc::clone(&self.positions),
            index,
            ply: self.ply + 1,
        }
    }

    fn get_winner(&self) -> Option<u8> {
        match self.position() {
            Position::Leaf(payoff) if *payoff > 0.0 => Some(0),
            Position::Leaf(payoff) if *payoff < 0.0 => Some(1),
            _ => None,
        }
    }
}

/// Evaluator reading the stored payoff or estimate, negated for player 1.
pub(crate) fn tree_value(board: &TreeGame, player: u8) -> f64 {
    if player == 0 { board.value() } else { -board.value() }
}
