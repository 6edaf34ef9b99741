//! A hand-tuned static evaluator for Othello, built from four normalized heuristics.
//!
//! Each heuristic compares the evaluated player with the opponent as
//! `100 * (mine - theirs) / (mine + theirs)`, so all of them live in `-100..=100` and are `0` when
//! neither side has anything to count. Corners and stability are weighted eight times as much
//! as disc count and mobility.

use crate::boards::othello::{OthelloBoard, OthelloMove, OthelloPlayer, SIZE};
use crate::error::SearchError;
use crate::minimax::{SearchDepth, minimax_move};

const CORNERS: [OthelloMove; 4] = [(0, 0), (0, SIZE - 1), (SIZE - 1, 0), (SIZE - 1, SIZE - 1)];

const CORNER_WEIGHT: f64 = 8.0;
const STABILITY_WEIGHT: f64 = 8.0;

/// Search depth used by [`make_move`].
pub const AGENT_DEPTH: u32 = 4;

/// Picks a move with a depth-limited alpha-beta search over [`evaluate_custom`].
pub fn make_move(board: &OthelloBoard) -> Result<OthelloMove, SearchError> {
    minimax_move(board, SearchDepth::Plies(AGENT_DEPTH), evaluate_custom)
}

/// Evaluates `board` from the point of view of `player`.
pub fn evaluate_custom(board: &OthelloBoard, player: OthelloPlayer) -> f64 {
    coin_parity(board, player)
        + mobility(board, player)
        + CORNER_WEIGHT * corners(board, player)
        + STABILITY_WEIGHT * stability(board, player)
}

fn normalized_difference(mine: usize, theirs: usize) -> f64 {
    if mine + theirs == 0 {
        return 0.0;
    }
    100.0 * (mine as f64 - theirs as f64) / (mine + theirs) as f64
}

/// Difference in disc count.
pub fn coin_parity(board: &OthelloBoard, player: OthelloPlayer) -> f64 {
    normalized_difference(
        board.num_pieces(player),
        board.num_pieces(player.opponent()),
    )
}

/// Difference in the number of legal moves.
pub fn mobility(board: &OthelloBoard, player: OthelloPlayer) -> f64 {
    normalized_difference(
        board.legal_moves_for(player).len(),
        board.legal_moves_for(player.opponent()).len(),
    )
}

/// Difference in owned corners, also counting a corner that only one side could take next.
pub fn corners(board: &OthelloBoard, player: OthelloPlayer) -> f64 {
    let opponent = player.opponent();
    let mut mine = 0;
    let mut theirs = 0;
    for corner in CORNERS {
        match board.cell(corner.0, corner.1) {
            Some(owner) if owner == player => mine += 1,
            Some(_) => theirs += 1,
            None => {}
        }

        let i_can_take = board.is_legal(corner, player);
        let they_can_take = board.is_legal(corner, opponent);
        if i_can_take && !they_can_take {
            mine += 1;
        } else if they_can_take && !i_can_take {
            theirs += 1;
        }
    }
    normalized_difference(mine, theirs)
}

/// Difference in the number of stable discs.
pub fn stability(board: &OthelloBoard, player: OthelloPlayer) -> f64 {
    normalized_difference(
        count_stable(board, player),
        count_stable(board, player.opponent()),
    )
}

/// Counts discs of `player` that can no longer be flipped.
///
/// Owned corners are stable. A disc becomes stable once, along each of its four axes, it sits on
/// the edge of the board or next to a stable disc of the same player. The marking repeats until
/// nothing changes.
pub fn count_stable(board: &OthelloBoard, player: OthelloPlayer) -> usize {
    let mut stable = [[false; SIZE]; SIZE];
    let mut changed = false;
    for (row, col) in CORNERS {
        if board.cell(row, col) == Some(player) {
            stable[row][col] = true;
            changed = true;
        }
    }

    while changed {
        changed = false;
        for row in 0..SIZE {
            for col in 0..SIZE {
                if board.cell(row, col) == Some(player)
                    && !stable[row][col]
                    && is_anchored(&stable, row, col)
                {
                    stable[row][col] = true;
                    changed = true;
                }
            }
        }
    }

    stable.iter().flatten().filter(|&&s| s).count()
}

/// Whether every axis through `(row, col)` ends at the edge or touches a stable neighbour.
fn is_anchored(stable: &[[bool; SIZE]; SIZE], row: usize, col: usize) -> bool {
    let last = SIZE - 1;
    let on_row_edge = row == 0 || row == last;
    let on_col_edge = col == 0 || col == last;

    let horizontal = on_col_edge || stable[row][col - 1] || stable[row][col + 1];
    let vertical = on_row_edge || stable[row - 1][col] || stable[row + 1][col];
    if on_row_edge || on_col_edge {
        return horizontal && vertical;
    }
    let diagonal = stable[row - 1][col - 1] || stable[row + 1][col + 1];
    let anti_diagonal = stable[row + 1][col - 1] || stable[row - 1][col + 1];
    horizontal && vertical && diagonal && anti_diagonal
}
