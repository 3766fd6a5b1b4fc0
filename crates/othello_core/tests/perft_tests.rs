use std::time::Instant;

use rayon::prelude::*;

use othello_core::{perft, perft_hashed, Board, Move};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

/// Leaf counts from the initial position, passes counted as plies.
const STARTPOS_COUNTS: &[(u8, u64)] = &[
    (1, 4),
    (2, 12),
    (3, 56),
    (4, 244),
    (5, 1_396),
    (6, 8_200),
    (7, 55_092),
    (8, 390_216),
];

#[test]
fn perft_from_initial_position() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    STARTPOS_COUNTS.par_iter().for_each(|&(depth, expected)| {
        if !full && expected > NODE_LIMIT {
            eprintln!("Skipping depth {depth} ({expected} nodes), set {FULL_PERFT_ENV}=1 to run it.");
            return;
        }
        let start = Instant::now();
        let mut board = Board::startpos();
        let got = perft(&mut board, depth);
        assert_eq!(got, expected, "perft mismatch at depth {depth}");
        assert_eq!(board, Board::startpos(), "perft must restore the board");
        println!("depth {depth}: {got} nodes in {:.3?}", start.elapsed());
    });
}

#[test]
fn perft_hashes_stay_consistent() {
    let mut board = Board::startpos();
    assert_eq!(perft_hashed(&mut board, 6), Some(8_200));
}

#[test]
fn perft_handles_forced_pass_and_game_end() {
    // White must pass; black then has exactly one move, which ends the game.
    let mut board: Board = "
        XO------
        --------
        --------
        --------
        --------
        --------
        --------
        -------- white"
        .parse()
        .expect("valid diagram");
    assert_eq!(perft(&mut board, 1), 1);
    assert_eq!(perft(&mut board, 2), 1);
    assert_eq!(perft(&mut board, 5), 1);

    assert!(board.play(Move::PASS));
    assert!(board.play(Move::new(2)));
    assert!(board.is_game_over());
    assert_eq!(perft(&mut board, 3), 1);
}
