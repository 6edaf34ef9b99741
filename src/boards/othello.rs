use crate::board::Board;
use std::fmt;

/// Side length of the board.
pub const SIZE: usize = 8;

/// A move is a `(row, column)` coordinate, `(0, 0)` being the top-left corner.
pub type OthelloMove = (usize, usize);

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum OthelloPlayer {
    Black,
    White,
}

impl OthelloPlayer {
    pub fn opponent(self) -> Self {
        match self {
            OthelloPlayer::Black => OthelloPlayer::White,
            OthelloPlayer::White => OthelloPlayer::Black,
        }
    }

    fn symbol(self) -> char {
        match self {
            OthelloPlayer::Black => 'B',
            OthelloPlayer::White => 'W',
        }
    }
}

/// An implementation of the `Board` trait for Othello.
///
/// Black moves first. A player without a legal move passes, and the game ends once neither
/// player can move. The winner is whoever owns more discs; equal counts are a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloBoard {
    cells: [[Option<OthelloPlayer>; SIZE]; SIZE],
    current_player: OthelloPlayer,
}

impl Default for OthelloBoard {
    /// The standard opening position.
    fn default() -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        cells[3][3] = Some(OthelloPlayer::White);
        cells[3][4] = Some(OthelloPlayer::Black);
        cells[4][3] = Some(OthelloPlayer::Black);
        cells[4][4] = Some(OthelloPlayer::White);
        Self {
            cells,
            current_player: OthelloPlayer::Black,
        }
    }
}

impl OthelloBoard {
    /// Builds a position from eight rows of `B`, `W` and `.` characters.
    ///
    /// Returns `None` for malformed input. If `to_move` has no legal move but the opponent does,
    /// the turn passes straight away, as it would during play.
    pub fn from_rows(rows: [&str; SIZE], to_move: OthelloPlayer) -> Option<Self> {
        let mut cells = [[None; SIZE]; SIZE];
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != SIZE {
                return None;
            }
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = match symbol {
                    'B' => Some(OthelloPlayer::Black),
                    'W' => Some(OthelloPlayer::White),
                    '.' => None,
                    _ => return None,
                };
            }
        }
        let mut board = Self {
            cells,
            current_player: to_move,
        };
        board.current_player = board.player_after(to_move.opponent());
        Some(board)
    }

    /// The disc on a square, if any.
    pub fn cell(&self, row: usize, col: usize) -> Option<OthelloPlayer> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Number of discs owned by `player`.
    pub fn num_pieces(&self, player: OthelloPlayer) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(player))
            .count()
    }

    /// Whether `player` could place a disc on `square` in this position.
    pub fn is_legal(&self, square: OthelloMove, player: OthelloPlayer) -> bool {
        let (row, col) = square;
        row < SIZE
            && col < SIZE
            && self.cells[row][col].is_none()
            && DIRECTIONS
                .iter()
                .any(|&dir| self.flips_in_direction(square, dir, player) > 0)
    }

    /// Every square `player` could play, in row-major order, regardless of whose turn it is.
    pub fn legal_moves_for(&self, player: OthelloPlayer) -> Vec<OthelloMove> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&square| self.is_legal(square, player))
            .collect()
    }

    fn has_moves(&self, player: OthelloPlayer) -> bool {
        (0..SIZE).any(|row| (0..SIZE).any(|col| self.is_legal((row, col), player)))
    }

    /// Player to move once `mover` has finished: the opponent, unless the opponent has to pass.
    fn player_after(&self, mover: OthelloPlayer) -> OthelloPlayer {
        let opponent = mover.opponent();
        if !self.has_moves(opponent) && self.has_moves(mover) {
            mover
        } else {
            opponent
        }
    }

    /// Number of opponent discs that `player` would flip in one direction from `square`.
    fn flips_in_direction(
        &self,
        square: OthelloMove,
        (dr, dc): (isize, isize),
        player: OthelloPlayer,
    ) -> usize {
        let mut count = 0;
        let mut row = square.0 as isize + dr;
        let mut col = square.1 as isize + dc;
        while (0..SIZE as isize).contains(&row) && (0..SIZE as isize).contains(&col) {
            match self.cells[row as usize][col as usize] {
                Some(owner) if owner == player => return count,
                Some(_) => count += 1,
                None => return 0,
            }
            row += dr;
            col += dc;
        }
        0
    }
}

impl Board for OthelloBoard {
    type Move = OthelloMove;
    type Player = OthelloPlayer;

    fn get_current_player(&self) -> OthelloPlayer {
        self.current_player
    }

    fn is_terminal(&self) -> bool {
        !self.has_moves(OthelloPlayer::Black) && !self.has_moves(OthelloPlayer::White)
    }

    fn get_available_moves(&self) -> Vec<OthelloMove> {
        self.legal_moves_for(self.current_player)
    }

    fn next_state(&self, b_move: &OthelloMove) -> Self {
        let player = self.current_player;
        let (row, col) = *b_move;
        let mut next = self.clone();
        for dir in DIRECTIONS {
            let flips = self.flips_in_direction(*b_move, dir, player);
            for step in 1..=flips as isize {
                let r = (row as isize + dir.0 * step) as usize;
                let c = (col as isize + dir.1 * step) as usize;
                next.cells[r][c] = Some(player);
            }
        }
        next.cells[row][col] = Some(player);
        next.current_player = next.player_after(player);
        next
    }

    fn get_winner(&self) -> Option<OthelloPlayer> {
        let black = self.num_pieces(OthelloPlayer::Black);
        let white = self.num_pieces(OthelloPlayer::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(OthelloPlayer::Black),
            std::cmp::Ordering::Less => Some(OthelloPlayer::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for OthelloBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', OthelloPlayer::symbol))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
