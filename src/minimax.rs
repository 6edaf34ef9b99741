use crate::board::Board;
use crate::error::SearchError;
use crate::evaluator::Evaluator;
use tracing::debug;

/// How many plies the search may look ahead.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum SearchDepth {
    /// Search until every line reaches a terminal position.
    #[default]
    Unlimited,
    /// Stop after this many plies and evaluate the position reached.
    Plies(u32),
}

impl SearchDepth {
    fn is_exhausted(self) -> bool {
        self == SearchDepth::Plies(0)
    }

    fn next(self) -> Self {
        match self {
            SearchDepth::Unlimited => SearchDepth::Unlimited,
            SearchDepth::Plies(n) => SearchDepth::Plies(n.saturating_sub(1)),
        }
    }
}

impl From<i32> for SearchDepth {
    /// Any negative value (conventionally `-1`) means unlimited.
    fn from(depth: i32) -> Self {
        u32::try_from(depth).map_or(SearchDepth::Unlimited, SearchDepth::Plies)
    }
}

/// Counters collected during one search.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct SearchStats {
    /// Positions entered, including the root.
    pub nodes: u64,
    /// Calls to the evaluator.
    pub evaluations: u64,
    /// Times the remaining moves of a position were skipped.
    pub cutoffs: u64,
}

/// Result of a minimax search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<M> {
    /// The move chosen at the root.
    pub best_move: M,
    /// The backed-up value of the root for the searching player.
    pub value: f64,
    /// Counters collected while searching.
    pub stats: SearchStats,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The player to move at the root maximizes and plies strictly alternate between maximizing
/// and minimizing, so the game is assumed to alternate turns. Every leaf is scored by the
/// evaluator from the root player's point of view. Among moves of equal value the first one in
/// `get_available_moves` order wins.
#[derive(Debug, Clone)]
pub struct MinimaxSearch<E> {
    evaluator: E,
    depth: SearchDepth,
}

impl<E> MinimaxSearch<E> {
    /// Creates an unlimited-depth search.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            depth: SearchDepth::Unlimited,
        }
    }

    /// Limits the search depth.
    ///
    /// A non-terminal root is always expanded, so `Plies(0)` behaves like `Plies(1)`.
    pub fn with_depth(mut self, depth: impl Into<SearchDepth>) -> Self {
        self.depth = depth.into();
        self
    }

    /// Returns the best move for the player to move.
    pub fn choose_move<T>(&self, board: &T) -> Result<T::Move, SearchError>
    where
        T: Board,
        E: Evaluator<T>,
    {
        self.search(board).map(|outcome| outcome.best_move)
    }

    /// Runs the search and returns the chosen move together with its value and statistics.
    pub fn search<T>(&self, board: &T) -> Result<SearchOutcome<T::Move>, SearchError>
    where
        T: Board,
        E: Evaluator<T>,
    {
        if board.is_terminal() {
            return Err(SearchError::TerminalState);
        }

        let depth = match self.depth {
            SearchDepth::Plies(0) => SearchDepth::Plies(1),
            depth => depth,
        };
        let root_player = board.get_current_player();
        let mut stats = SearchStats::default();
        let (value, best_move) = max_node(
            board,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            root_player,
            &self.evaluator,
            &mut stats,
        )?;
        let best_move = best_move.ok_or(SearchError::NoLegalMoves)?;

        debug!(
            depth = ?self.depth,
            value,
            nodes = stats.nodes,
            evaluations = stats.evaluations,
            cutoffs = stats.cutoffs,
            chosen = ?best_move,
            "minimax move chosen"
        );
        Ok(SearchOutcome {
            best_move,
            value,
            stats,
        })
    }
}

/// Chooses a move for `board` with alpha-beta search. `max_depth` of `-1` searches to the end of
/// the game.
pub fn minimax_move<T, E>(
    board: &T,
    max_depth: impl Into<SearchDepth>,
    evaluator: E,
) -> Result<T::Move, SearchError>
where
    T: Board,
    E: Evaluator<T>,
{
    MinimaxSearch::new(evaluator)
        .with_depth(max_depth)
        .choose_move(board)
}

/// Value and move of a leaf, or `None` when the search continues below `board`.
fn leaf<T, E>(
    board: &T,
    depth: SearchDepth,
    root_player: T::Player,
    evaluator: &E,
    stats: &mut SearchStats,
) -> Option<(f64, Option<T::Move>)>
where
    T: Board,
    E: Evaluator<T>,
{
    stats.nodes += 1;
    if depth.is_exhausted() || board.is_terminal() {
        stats.evaluations += 1;
        return Some((evaluator.evaluate(board, root_player), None));
    }
    None
}

fn max_node<T, E>(
    board: &T,
    depth: SearchDepth,
    mut alpha: f64,
    beta: f64,
    root_player: T::Player,
    evaluator: &E,
    stats: &mut SearchStats,
) -> Result<(f64, Option<T::Move>), SearchError>
where
    T: Board,
    E: Evaluator<T>,
{
    if let Some(result) = leaf(board, depth, root_player, evaluator, stats) {
        return Ok(result);
    }

    let moves = board.get_available_moves();
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let mut best_value = f64::NEG_INFINITY;
    let mut best_move = None;
    let count = moves.len();
    for (i, b_move) in moves.into_iter().enumerate() {
        let next = board.next_state(&b_move);
        let (value, _) = min_node(
            &next,
            depth.next(),
            alpha,
            beta,
            root_player,
            evaluator,
            stats,
        )?;

        if best_move.is_none() || value > best_value {
            best_value = value;
            best_move = Some(b_move);
        }

        alpha = alpha.max(best_value);
        if alpha >= beta {
            if i + 1 < count {
                stats.cutoffs += 1;
            }
            break;
        }
    }

    Ok((best_value, best_move))
}

fn min_node<T, E>(
    board: &T,
    depth: SearchDepth,
    alpha: f64,
    mut beta: f64,
    root_player: T::Player,
    evaluator: &E,
    stats: &mut SearchStats,
) -> Result<(f64, Option<T::Move>), SearchError>
where
    T: Board,
    E: Evaluator<T>,
{
    if let Some(result) = leaf(board, depth, root_player, evaluator, stats) {
        return Ok(result);
    }

    let moves = board.get_available_moves();
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let mut best_value = f64::INFINITY;
    let mut best_move = None;
    let count = moves.len();
    for (i, b_move) in moves.into_iter().enumerate() {
        let next = board.next_state(&b_move);
        let (value, _) = max_node(
            &next,
            depth.next(),
            alpha,
            beta,
            root_player,
            evaluator,
            stats,
        )?;

        if best_move.is_none() || value < best_value {
            best_value = value;
            best_move = Some(b_move);
        }

        beta = beta.min(best_value);
        if beta <= alpha {
            if i + 1 < count {
                stats.cutoffs += 1;
            }
            break;
        }
    }

    Ok((best_value, best_move))
}
