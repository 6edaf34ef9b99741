extern crate game_search;

use game_search::board::Board;
use game_search::boards::tic_tac_toe::{TicTacToeBoard, TicTacToePlayer};
use game_search::evaluator::OutcomeEvaluator;
use game_search::mcts::MonteCarloTreeSearch;
use game_search::minimax::{SearchDepth, minimax_move};
use game_search::random::SeededRandomGenerator;

fn main() {
    // X searches with MCTS, O plays perfectly with a full-depth minimax
    let mut board = TicTacToeBoard::default();
    let mut seed = 0;

    while !board.is_terminal() {
        let b_move = match board.get_current_player() {
            TicTacToePlayer::X => {
                seed += 1;
                let mut mcts = MonteCarloTreeSearch::builder(board.clone())
                    .with_random_generator(SeededRandomGenerator::new(seed))
                    .with_iterations(2000)
                    .build();
                let b_move = mcts.choose_move().expect("X has a move");

                // Print the chances
                for node in mcts.get_root().children() {
                    println!(
                        "Move: {:?} = {:.2?}% wins, {:.2?}% draws",
                        node.value().prev_move,
                        node.value().wins_rate() * 100.0,
                        node.value().draws_rate() * 100.0
                    );
                }
                b_move
            }
            TicTacToePlayer::O => {
                minimax_move(&board, SearchDepth::Unlimited, OutcomeEvaluator).expect("O has a move")
            }
        };

        println!("{:?} plays {}", board.get_current_player(), b_move);
        board = board.next_state(&b_move);
    }

    let winner = board.get_winner();
    println!("Winner: {:?}", winner);
    assert_ne!(winner, Some(TicTacToePlayer::X), "perfect play never loses");
}
