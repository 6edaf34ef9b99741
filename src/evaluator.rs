use crate::board::Board;

/// A static evaluation function used by minimax once the search stops descending.
///
/// Implementations must return the exact utility for terminal boards and an estimate for
/// interior boards, always on the same scale and from the point of view of `player`.
pub trait Evaluator<T: Board> {
    fn evaluate(&self, board: &T, player: T::Player) -> f64;
}

impl<T, F> Evaluator<T> for F
where
    T: Board,
    F: Fn(&T, T::Player) -> f64,
{
    fn evaluate(&self, board: &T, player: T::Player) -> f64 {
        self(board, player)
    }
}

/// Scores only finished games: `1.0` for a win, `-1.0` for a loss and `0.0` for anything else.
///
/// Useful with [`SearchDepth::Unlimited`](crate::minimax::SearchDepth::Unlimited), where every
/// leaf is terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeEvaluator;

impl<T: Board> Evaluator<T> for OutcomeEvaluator {
    fn evaluate(&self, board: &T, player: T::Player) -> f64 {
        if !board.is_terminal() {
            return 0.0;
        }
        crate::board::GameOutcome::for_player(board, player).reward() as f64
    }
}
