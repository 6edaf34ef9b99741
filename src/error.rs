use thiserror::Error;

/// Errors that can occur while choosing a move.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum SearchError {
    /// The search was started from a finished game, so there is no move to return.
    #[error("no move available: the position is already terminal")]
    TerminalState,

    /// The game reported an empty move list for a position it claims is still in progress.
    #[error("non-terminal position reported no legal moves")]
    NoLegalMoves,
}
