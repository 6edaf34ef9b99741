use crate::board::{Board, GameOutcome};
use crate::error::SearchError;
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use ego_tree::{NodeId, NodeRef, Tree};
use tracing::{debug, trace};

/// Number of iterations run by [`MonteCarloTreeSearch::choose_move`] unless configured otherwise.
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Weight of the exploration term in the UCB formula.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 1.0;

/// Decides from whose point of view a simulation result is credited to each node on the path.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum BackpropagationMode {
    /// Every ancestor records the raw result, measured against the player to move at the end of
    /// the rollout.
    Shared,
    /// Each node records the result for the player who chose the move leading to it (the root
    /// uses its own player). The result is inverted whenever that player differs from the
    /// rollout's reference player, so `best_child` always maximizes for the player to move.
    #[default]
    PerPlayer,
}

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the random number generator, and the configuration for the search.
/// The tree is an arena: nodes are addressed by `NodeId` and only ever reached from the root
/// through a single path.
pub struct MonteCarloTreeSearch<T: Board, K: RandomGenerator> {
    tree: Tree<MctsNode<T>>,
    random: K,
    iterations: u32,
    exploration_constant: f64,
    backpropagation_mode: BackpropagationMode,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// This provides a convenient way to configure the MCTS search with different parameters.
pub struct MonteCarloTreeSearchBuilder<T: Board, K: RandomGenerator> {
    board: T,
    random_generator: K,
    iterations: u32,
    exploration_constant: f64,
    backpropagation_mode: BackpropagationMode,
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearchBuilder<T, K> {
    /// Creates a new builder with the given initial board state.
    pub fn new(board: T) -> Self {
        Self {
            board,
            random_generator: K::default(),
            iterations: DEFAULT_ITERATIONS,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            backpropagation_mode: BackpropagationMode::default(),
        }
    }

    /// Sets the random number generator used for rollouts.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Sets the iteration budget of `choose_move`. At least one iteration is always run.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Sets the exploration constant `C` of the UCB formula.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Chooses how simulation results are credited to ancestors.
    pub fn with_backpropagation_mode(mut self, mode: BackpropagationMode) -> Self {
        self.backpropagation_mode = mode;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> MonteCarloTreeSearch<T, K> {
        MonteCarloTreeSearch {
            tree: Tree::new(MctsNode::new(self.board)),
            random: self.random_generator,
            iterations: self.iterations,
            exploration_constant: self.exploration_constant,
            backpropagation_mode: self.backpropagation_mode,
        }
    }
}

impl<T: Board, K: RandomGenerator> MonteCarloTreeSearch<T, K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(board: T) -> MonteCarloTreeSearchBuilder<T, K> {
        MonteCarloTreeSearchBuilder::new(board)
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<T>> {
        self.tree.root()
    }

    /// Returns the id of the root node.
    pub fn get_root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Runs the configured number of iterations on a fresh tree rooted at the current root
    /// board and returns the move leading to the root's best child.
    ///
    /// Any tree left over from an earlier call or from `iterate_n_times` is discarded first.
    /// Fails with [`SearchError::TerminalState`] when the root is already a finished game.
    pub fn choose_move(&mut self) -> Result<T::Move, SearchError> {
        if self.get_root().value().is_terminal {
            return Err(SearchError::TerminalState);
        }

        let board = self.get_root().value().board.clone();
        self.tree = Tree::new(MctsNode::new(board));
        self.iterate_n_times(self.iterations)?;

        let best_id = self
            .best_child(self.get_root_id())
            .ok_or(SearchError::NoLegalMoves)?;
        let best = self.node(best_id);
        let b_move = best.prev_move.clone().ok_or(SearchError::NoLegalMoves)?;

        debug!(
            iterations = self.iterations,
            nodes = self.tree.nodes().count(),
            visits = best.visits,
            score = best.score(),
            chosen = ?b_move,
            "MCTS move chosen"
        );
        Ok(b_move)
    }

    /// Runs the search for a specified number of iterations.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<(), SearchError> {
        for _ in 0..n {
            self.do_iteration()?;
        }
        Ok(())
    }

    /// Performs one full iteration: selection/expansion, simulation and backpropagation.
    /// Returns the node the simulation was run from.
    pub fn do_iteration(&mut self) -> Result<NodeId, SearchError> {
        let node_id = self.choose_child()?;
        let (outcome, reference) = self.simulate(node_id)?;
        self.backpropagate(node_id, outcome, reference);

        trace!(
            height = self.node(node_id).height,
            result = outcome.reward(),
            "MCTS iteration complete"
        );
        Ok(node_id)
    }

    /// Picks the child with the highest UCB value. Ties go to the earliest child.
    ///
    /// Returns `None` when the node has no children.
    pub fn best_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.tree.get(node_id)?;
        let parent_visits = node.value().visits;
        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let ucb = child
                .value()
                .ucb_value(parent_visits, self.exploration_constant);
            if best.is_none_or(|(_, max_ucb)| ucb > max_ucb) {
                best = Some((child.id(), ucb));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Collects statistics about the current tree.
    pub fn tree_stats(&self) -> TreeStats {
        TreeStats {
            total_nodes: self.tree.nodes().count(),
            root_visits: self.get_root().value().visits,
            max_depth: self
                .tree
                .nodes()
                .map(|n| n.value().height)
                .max()
                .unwrap_or(0),
        }
    }

    fn node(&self, node_id: NodeId) -> &MctsNode<T> {
        self.tree
            .get(node_id)
            .map(|n| n.value())
            .expect("node ids are only handed out by this tree")
    }

    /// Descends from the root until it either expands a new child or reaches a terminal node.
    fn choose_child(&mut self) -> Result<NodeId, SearchError> {
        let mut node_id = self.get_root_id();
        loop {
            let node = self.node(node_id);
            if node.is_terminal {
                return Ok(node_id);
            }
            if !node.is_fully_expanded() {
                return self.expand(node_id).ok_or(SearchError::NoLegalMoves);
            }
            node_id = self.best_child(node_id).ok_or(SearchError::NoLegalMoves)?;
        }
    }

    /// Turns the first untried move of a node into a new child.
    fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let mut node = self.tree.get_mut(node_id)?;
        let child = {
            let parent = node.value();
            let b_move = parent.untried_moves.pop_front()?;
            let board = parent.board.next_state(&b_move);
            MctsNode::new_child(board, b_move, parent.height)
        };
        Some(node.append(child).id())
    }

    /// Plays uniformly random moves until the game ends.
    ///
    /// The outcome is measured against the player to move on the final board, which is returned
    /// alongside it.
    fn simulate(&mut self, node_id: NodeId) -> Result<(GameOutcome, T::Player), SearchError> {
        let mut board = self.node(node_id).board.clone();
        while !board.is_terminal() {
            let moves = board.get_available_moves();
            let random_move = self
                .random
                .choose(&moves)
                .ok_or(SearchError::NoLegalMoves)?;
            board = board.next_state(random_move);
        }

        let reference = board.get_current_player();
        Ok((GameOutcome::for_player(&board, reference), reference))
    }

    /// Credits a simulation result to the node and every ancestor up to the root.
    fn backpropagate(&mut self, node_id: NodeId, outcome: GameOutcome, reference: T::Player) {
        let mut current = Some(node_id);
        while let Some(id) = current {
            let parent_id = self
                .tree
                .get(id)
                .and_then(|n| n.parent())
                .map(|p| p.id());

            let credited = match self.backpropagation_mode {
                BackpropagationMode::Shared => outcome,
                BackpropagationMode::PerPlayer => {
                    let perspective = self.node(parent_id.unwrap_or(id)).player;
                    if perspective == reference {
                        outcome
                    } else {
                        outcome.inverted()
                    }
                }
            };

            if let Some(mut node) = self.tree.get_mut(id) {
                node.value().record(credited);
            }
            current = parent_id;
        }
    }
}

impl<T: Board> MonteCarloTreeSearch<T, StandardRandomGenerator> {
    pub fn from_board(board: T) -> Self {
        MonteCarloTreeSearchBuilder::new(board).build()
    }
}

/// Chooses a move for `board` with a fresh tree, the default budget and the thread-local
/// random generator. The tree is discarded afterwards.
pub fn mcts_move<T: Board>(board: &T) -> Result<T::Move, SearchError> {
    MonteCarloTreeSearch::from_board(board.clone()).choose_move()
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::boards::othello::OthelloBoard;
    use crate::boards::tic_tac_toe::TicTacToeBoard;
    use crate::error::SearchError;
    use crate::mcts::{BackpropagationMode, MonteCarloTreeSearch, mcts_move};
    use crate::random::SeededRandomGenerator;
    use crate::test_games::TreeGame;

    fn seeded<T: Board>(board: T, seed: u64) -> MonteCarloTreeSearch<T, SeededRandomGenerator> {
        MonteCarloTreeSearch::builder(board)
            .with_random_generator(SeededRandomGenerator::new(seed))
            .build()
    }

    #[test]
    fn chosen_move_is_legal() {
        // arrange
        let ttt = TicTacToeBoard::default().next_state(&4);
        let othello = OthelloBoard::default();

        // act
        let ttt_move = seeded(ttt.clone(), 1).choose_move().unwrap();
        let othello_move = seeded(othello.clone(), 1).choose_move().unwrap();
        let unseeded_move = mcts_move(&othello).unwrap();

        // assert
        assert!(ttt.get_available_moves().contains(&ttt_move));
        assert!(othello.get_available_moves().contains(&othello_move));
        assert!(othello.get_available_moves().contains(&unseeded_move));
    }

    #[test]
    fn terminal_root_has_no_move() {
        let finished = [0u8, 3, 1, 4, 2]
            .iter()
            .fold(TicTacToeBoard::default(), |b, m| b.next_state(m));
        assert!(finished.is_terminal());

        let mut mcts = seeded(finished.clone(), 7);
        assert_eq!(mcts.choose_move(), Err(SearchError::TerminalState));
        assert_eq!(mcts_move(&finished), Err(SearchError::TerminalState));
        assert_eq!(mcts.get_root().value().visits, 0);
    }

    #[test]
    fn single_move_game_returns_that_move() {
        let mut mcts = seeded(TreeGame::single_move(1.0), 3);
        assert_eq!(mcts.choose_move(), Ok(0));
    }

    #[test]
    fn broken_game_is_reported() {
        let mut mcts = seeded(TreeGame::broken(), 3);
        assert_eq!(mcts.choose_move(), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn every_call_searches_a_fresh_tree() {
        // arrange
        let mut mcts = MonteCarloTreeSearch::builder(OthelloBoard::default())
            .with_random_generator(SeededRandomGenerator::new(6))
            .with_iterations(40)
            .build();
        mcts.iterate_n_times(15).unwrap();

        // act
        let first = mcts.choose_move().unwrap();
        let after_first = mcts.tree_stats();
        let second = mcts.choose_move().unwrap();
        let after_second = mcts.tree_stats();

        // assert
        assert_eq!(after_first.root_visits, 40);
        assert_eq!(after_second.root_visits, 40);
        assert_eq!(after_second.total_nodes, 41);
        let legal = OthelloBoard::default().get_available_moves();
        assert!(legal.contains(&first));
        assert!(legal.contains(&second));
    }

    #[test]
    fn root_visits_equal_iterations() {
        // arrange
        let mut mcts = seeded(TicTacToeBoard::default(), 42);

        // act
        mcts.iterate_n_times(500).unwrap();

        // assert
        let root = mcts.get_root();
        assert_eq!(root.value().visits, 500);
        for node in mcts.get_tree().nodes() {
            let data = node.value();
            assert!(data.wins + data.loses <= data.visits);
            assert_eq!(data.visits, data.wins + data.loses + data.draws());
            let child_visits: u32 = node.children().map(|c| c.value().visits).sum();
            assert!(child_visits <= data.visits);
        }
        assert_eq!(mcts.tree_stats().root_visits, 500);
    }

    #[test]
    fn untried_plus_children_equals_legal_moves() {
        let mut mcts = seeded(OthelloBoard::default(), 9);
        for _ in 0..60 {
            mcts.do_iteration().unwrap();
            for node in mcts.get_tree().nodes() {
                let data = node.value();
                let legal = if data.is_terminal {
                    0
                } else {
                    data.board.get_available_moves().len()
                };
                let children = node.children().count();
                assert_eq!(data.untried_moves.len() + children, legal);
            }
        }
    }

    #[test]
    fn every_child_is_reached_by_its_move() {
        let mut mcts = seeded(TicTacToeBoard::default(), 11);
        mcts.iterate_n_times(200).unwrap();
        for node in mcts.get_tree().nodes() {
            match node.parent() {
                None => assert_eq!(node.value().prev_move, None),
                Some(parent) => {
                    let b_move = node.value().prev_move.unwrap();
                    let expected = parent.value().board.next_state(&b_move);
                    assert_eq!(node.value().board, expected);
                    assert_eq!(node.value().height, parent.value().height + 1);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_move() {
        let board = OthelloBoard::default();
        for seed in [1, 2, 3, 4, 5] {
            let mut first = seeded(board.clone(), seed);
            let mut second = seeded(board.clone(), seed);
            assert_eq!(first.choose_move(), second.choose_move());
            assert_eq!(first.tree_stats(), second.tree_stats());
        }
    }

    #[test]
    fn tree_grows_by_one_node_per_iteration() {
        let mut mcts = seeded(OthelloBoard::default(), 5);
        mcts.iterate_n_times(25).unwrap();
        let stats = mcts.tree_stats();
        assert_eq!(stats.total_nodes, 26);
        assert!(stats.max_depth >= 1);
    }

    #[test]
    fn shared_mode_credits_raw_result_everywhere() {
        // every leaf is a win for player 0, who is also to move on every leaf
        let mut mcts = MonteCarloTreeSearch::builder(TreeGame::uniform(2, 2, 1.0))
            .with_random_generator(SeededRandomGenerator::new(1))
            .with_backpropagation_mode(BackpropagationMode::Shared)
            .build();

        mcts.iterate_n_times(30).unwrap();

        for node in mcts.get_tree().nodes() {
            assert_eq!(node.value().wins, node.value().visits);
        }
    }

    #[test]
    fn per_player_mode_credits_the_mover() {
        let mut mcts = MonteCarloTreeSearch::builder(TreeGame::uniform(2, 2, 1.0))
            .with_random_generator(SeededRandomGenerator::new(1))
            .build();

        mcts.iterate_n_times(30).unwrap();

        for node in mcts.get_tree().nodes() {
            let data = node.value();
            match data.height {
                // chosen by player 0, who wins every game
                0 | 1 => assert_eq!(data.wins, data.visits),
                // chosen by player 1, who loses every game
                _ => assert_eq!(data.loses, data.visits),
            }
        }
    }

    #[test]
    fn best_child_prefers_first_on_ties() {
        let mut mcts = seeded(TreeGame::uniform(1, 3, 0.0), 2);
        mcts.iterate_n_times(3).unwrap();
        let root_id = mcts.get_root_id();
        let best = mcts.best_child(root_id).unwrap();
        let first = mcts.get_root().first_child().unwrap().id();
        assert_eq!(best, first);
    }

    #[test]
    fn per_player_mode_finds_immediate_win() {
        // X to move with 2 completing the top row
        let board = [0u8, 3, 1, 4]
            .iter()
            .fold(TicTacToeBoard::default(), |b, m| b.next_state(m));
        let mut mcts = MonteCarloTreeSearch::builder(board)
            .with_random_generator(SeededRandomGenerator::new(8))
            .with_iterations(400)
            .with_exploration_constant(0.0)
            .build();

        assert_eq!(mcts.choose_move(), Ok(2));
    }
}
