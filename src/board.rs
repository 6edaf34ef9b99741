use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// Both search engines drive a game exclusively through this trait. A board is treated as an
/// immutable snapshot: `next_state` returns a fresh value and never touches the receiver, so the
/// engines can keep every explored position around without worrying about aliasing.
pub trait Board: Clone {
    /// The type representing a move in the game. This could be a simple `u8` for a board position
    /// or a coordinate pair for games played on a grid.
    type Move: Clone + PartialEq + Debug;

    /// The type identifying a player. Only equality is required.
    type Player: Copy + Eq + Debug;

    /// Returns the player whose turn it is to make a move.
    fn get_current_player(&self) -> Self::Player;

    /// Returns `true` once no further moves are possible.
    fn is_terminal(&self) -> bool;

    /// Returns a list of all legal moves available to the current player.
    ///
    /// Must be non-empty for every non-terminal board.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Returns a new board with the given move applied and the turn advanced.
    fn next_state(&self, b_move: &Self::Move) -> Self;

    /// Returns the winner of a finished game, or `None` for a draw.
    ///
    /// Only meaningful once `is_terminal` returns `true`.
    fn get_winner(&self) -> Option<Self::Player>;
}

/// The outcome of a finished game, relative to some reference player.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The reference player has won.
    Win,
    /// The reference player has lost.
    Lose,
    /// Nobody won.
    Draw,
}

impl GameOutcome {
    /// Classifies a terminal board from the point of view of `player`.
    pub fn for_player<T: Board>(board: &T, player: T::Player) -> Self {
        match board.get_winner() {
            Some(winner) if winner == player => GameOutcome::Win,
            Some(_) => GameOutcome::Lose,
            None => GameOutcome::Draw,
        }
    }

    /// The numeric reward: `+1` for a win, `-1` for a loss and `0` for a draw.
    pub fn reward(self) -> i32 {
        match self {
            GameOutcome::Win => 1,
            GameOutcome::Lose => -1,
            GameOutcome::Draw => 0,
        }
    }

    /// The same outcome seen from the opponent's side.
    pub fn inverted(self) -> Self {
        match self {
            GameOutcome::Win => GameOutcome::Lose,
            GameOutcome::Lose => GameOutcome::Win,
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}
