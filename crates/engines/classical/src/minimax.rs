//! Plain fixed-depth minimax in negamax form, without pruning.

use othello_core::eval::evaluate_for_side_to_move;
use othello_core::{Board, Move, SearchLimits};

use crate::SearchOutcome;

/// Searches every legal move to `depth` plies and returns the best one.
///
/// Moves are tried in ascending square order; the first of equally scored
/// moves wins.
pub fn pick_best_move(
    board: &Board,
    depth: u8,
    nodes: &mut u64,
    limits: &SearchLimits,
) -> SearchOutcome {
    let mut tmp = *board;
    let moves = tmp.legal_moves();
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            stopped: false,
        };
    }

    let mut best: Option<(Move, i32)> = None;
    let mut stopped = false;

    for sq in moves {
        let flipped = tmp.flips(sq);
        let snapshot = tmp.make_move_with_flips(sq, flipped);
        *nodes += 1;

        let (score, was_stopped) = minimax(&mut tmp, depth.saturating_sub(1), nodes, limits);
        let score = -score;
        tmp.unmake_move(snapshot);

        if was_stopped {
            stopped = true;
            break;
        }
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((Move::new(sq), score));
        }
    }

    // A search stopped before finishing the first move still owes a legal
    // answer.
    if best.is_none() {
        let sq = moves.bit_scan_forward();
        best = Some((Move::new(sq), evaluate_for_side_to_move(board)));
    }

    SearchOutcome {
        best_move: best,
        stopped,
    }
}

/// Returns (score, stopped) from the side to move's perspective.
fn minimax(board: &mut Board, depth: u8, nodes: &mut u64, limits: &SearchLimits) -> (i32, bool) {
    if limits.poll(*nodes) {
        return (evaluate_for_side_to_move(board), true);
    }
    if depth == 0 || board.is_game_over() {
        return (evaluate_for_side_to_move(board), false);
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        let snapshot = board.pass();
        *nodes += 1;
        let (score, stopped) = minimax(board, depth - 1, nodes, limits);
        board.unmake_move(snapshot);
        return (-score, stopped);
    }

    let mut best = i32::MIN + 1;
    for sq in moves {
        let flipped = board.flips(sq);
        let snapshot = board.make_move_with_flips(sq, flipped);
        *nodes += 1;

        let (score, stopped) = minimax(board, depth - 1, nodes, limits);
        let score = -score;
        board.unmake_move(snapshot);

        if stopped {
            return (best.max(score), true);
        }
        best = best.max(score);
    }

    (best, false)
}

#[cfg(test)]
#[path = "minimax_tests.rs"]
mod minimax_tests;
