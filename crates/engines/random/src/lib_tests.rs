use super::*;
use othello_core::{Bitboard, Move, Side};

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::with_seed(1);
    let board = Board::startpos();

    for _ in 0..20 {
        let result = engine.search(&board, SearchLimits::depth(1));
        assert!(board.is_legal(result.best_move));
        assert!(!result.best_move.is_pass());
    }
}

#[test]
fn random_engine_covers_every_move() {
    let mut engine = RandomEngine::with_seed(3);
    let board = Board::startpos();
    let mut seen = Bitboard::EMPTY;
    for _ in 0..200 {
        let result = engine.search(&board, SearchLimits::depth(1));
        seen |= Bitboard::from_square(result.best_move.to_u8());
    }
    assert_eq!(seen, board.legal_moves());
}

#[test]
fn random_engine_is_reproducible_with_seed() {
    let board = Board::startpos();
    let play = |seed| {
        let mut engine = RandomEngine::with_seed(seed);
        (0..10)
            .map(|_| engine.search(&board, SearchLimits::depth(1)).best_move)
            .collect::<Vec<_>>()
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn random_engine_passes_when_forced() {
    let mut engine = RandomEngine::new();
    let board: Board = "
        XO------
        --------
        --------
        --------
        --------
        --------
        --------
        --------
        white"
        .parse()
        .unwrap();

    let result = engine.search(&board, SearchLimits::depth(1));
    assert_eq!(result.best_move, Move::PASS);
}

#[test]
fn random_engine_handles_finished_game() {
    let mut engine = RandomEngine::new();
    let board = Board {
        black: Bitboard::ALL,
        white: Bitboard::EMPTY,
        side_to_move: Side::Black,
    };

    let result = engine.search(&board, SearchLimits::depth(1));
    assert_eq!(result.best_move, Move::NONE);
}

#[test]
fn random_engine_plays_full_games() {
    let mut engine = RandomEngine::with_seed(9);
    let mut board = Board::startpos();
    let mut plies = 0;
    while !board.is_game_over() {
        let result = engine.search(&board, SearchLimits::depth(1));
        assert!(board.play(result.best_move), "{}\n{board}", result.best_move);
        plies += 1;
        assert!(plies <= 120);
    }
    assert!(board.empty_count() < 60);
}
