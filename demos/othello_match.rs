use game_search::board::Board;
use game_search::boards::othello::{OthelloBoard, OthelloPlayer};
use game_search::boards::othello_heuristics;
use game_search::mcts::MonteCarloTreeSearch;
use game_search::random::SeededRandomGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

const MCTS_ITERATIONS: u32 = 50;
const SEED: u64 = 2024;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Black searches with MCTS, White with the heuristic minimax agent
    let mut board = OthelloBoard::default();
    let mut turn: u64 = 0;

    while !board.is_terminal() {
        let player = board.get_current_player();
        let b_move = match player {
            OthelloPlayer::Black => {
                let mut mcts = MonteCarloTreeSearch::builder(board.clone())
                    .with_random_generator(SeededRandomGenerator::new(SEED + turn))
                    .with_iterations(MCTS_ITERATIONS)
                    .build();
                mcts.choose_move().expect("black has a move")
            }
            OthelloPlayer::White => {
                othello_heuristics::make_move(&board).expect("white has a move")
            }
        };

        assert!(board.get_available_moves().contains(&b_move));
        info!(turn, ?player, ?b_move, "move played");
        board = board.next_state(&b_move);
        turn += 1;
    }

    println!("{board}");
    info!(
        black = board.num_pieces(OthelloPlayer::Black),
        white = board.num_pieces(OthelloPlayer::White),
        winner = ?board.get_winner(),
        "game over"
    );
}
