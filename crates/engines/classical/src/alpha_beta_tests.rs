use super::*;
use othello_core::Bitboard;

/// A board with `discs` black discs and the rest empty; only the disc count
/// matters to the phase.
fn with_discs(discs: u32) -> Board {
    let mask = if discs >= 64 { u64::MAX } else { (1u64 << discs) - 1 };
    Board {
        black: Bitboard(mask),
        white: Bitboard::EMPTY,
        side_to_move: othello_core::Side::Black,
    }
}

#[test]
fn test_phase_depth() {
    assert_eq!(phase_depth(&Board::startpos(), 8), OPENING_DEPTH);
    assert_eq!(phase_depth(&with_discs(19), 8), OPENING_DEPTH);
    assert_eq!(phase_depth(&with_discs(19), 4), 4, "opening never deepens");
    assert_eq!(phase_depth(&with_discs(20), 8), 8);
    assert_eq!(phase_depth(&with_discs(52), 8), 8);
    // Past 52 discs: search to the end, at most 15 plies.
    assert_eq!(phase_depth(&with_discs(53), 8), 11);
    assert_eq!(phase_depth(&with_discs(60), 8), 4);
    assert_eq!(phase_depth(&with_discs(64), 8), 0);
}

#[test]
fn test_pruning_searches_fewer_nodes_than_minimax() {
    let board = Board::startpos();
    let limits = SearchLimits::depth(4);
    limits.start();

    let mut pruned = 0;
    let outcome = pick_best_move(&board, 4, &mut pruned, &limits);
    assert!(!outcome.stopped);
    assert!(board.is_legal(outcome.best_move.expect("startpos has moves").0));

    let mut full = 0;
    crate::minimax::pick_best_move(&board, 4, &mut full, &limits);
    // 4 + 12 + 56 + 244 placements
    assert_eq!(full, 316);
    assert!(pruned <= full);
}

#[test]
fn test_node_budget_still_answers() {
    let limits = SearchLimits::nodes(2_048);
    limits.start();
    let board = Board::startpos();
    let mut nodes = 0;
    let outcome = pick_best_move(&board, 12, &mut nodes, &limits);
    assert!(outcome.stopped);
    let (mv, _) = outcome.best_move.expect("a legal move is always returned");
    assert!(board.is_legal(mv));
    assert_eq!(nodes, 2_048);
}
