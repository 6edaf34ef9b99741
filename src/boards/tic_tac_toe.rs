use crate::board::Board;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is represented by a 9-element array, where each element corresponds to a cell.
/// A move is represented by a `u8` from 0 to 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    current_player: TicTacToePlayer,
    field: [Option<TicTacToePlayer>; 9],
    winner: Option<TicTacToePlayer>,
}

impl Default for TicTacToeBoard {
    /// Creates a new Tic-Tac-Toe board with player 'X' starting.
    fn default() -> Self {
        Self {
            current_player: TicTacToePlayer::X,
            field: [None; 9],
            winner: None,
        }
    }
}

impl TicTacToeBoard {
    /// Returns the mark in a cell.
    pub fn cell(&self, index: u8) -> Option<TicTacToePlayer> {
        self.field.get(index as usize).copied().flatten()
    }

    fn find_winner(&self) -> Option<TicTacToePlayer> {
        LINES.iter().find_map(|&[a, b, c]| match self.field[a] {
            Some(mark) if self.field[b] == Some(mark) && self.field[c] == Some(mark) => Some(mark),
            _ => None,
        })
    }
}

impl Board for TicTacToeBoard {
    type Move = u8;
    type Player = TicTacToePlayer;

    fn get_current_player(&self) -> TicTacToePlayer {
        self.current_player
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.field.iter().all(|x| x.is_some())
    }

    fn get_available_moves(&self) -> Vec<u8> {
        if self.is_terminal() {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| i as u8)
            .collect()
    }

    fn next_state(&self, b_move: &u8) -> Self {
        let mut next = self.clone();
        next.field[*b_move as usize] = Some(self.current_player);
        next.current_player = self.current_player.opponent();
        next.winner = next.find_winner();
        next
    }

    fn get_winner(&self) -> Option<TicTacToePlayer> {
        self.winner
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TicTacToePlayer {
    X,
    O,
}

impl TicTacToePlayer {
    pub fn opponent(self) -> Self {
        match self {
            TicTacToePlayer::X => TicTacToePlayer::O,
            TicTacToePlayer::O => TicTacToePlayer::X,
        }
    }
}
