//! Fixed-depth alpha-beta without a hash table.

use othello_core::eval::evaluate_for_side_to_move;
use othello_core::{Board, Move, SearchLimits};

use crate::ordering::order_by_square_weight;
use crate::SearchOutcome;

pub const OPENING_DEPTH: u8 = 6;
pub const ENDGAME_DEPTH_CAP: u8 = 15;
/// Fewer discs than this counts as the opening.
const OPENING_DISCS: u32 = 20;
/// More discs than this counts as the endgame.
const ENDGAME_DISCS: u32 = 52;

const INF: i32 = i32::MAX - 1;

/// Depth for the current phase: shallower in the opening, and up to the end
/// of the game (capped) once few squares remain.
pub fn phase_depth(board: &Board, midgame_depth: u8) -> u8 {
    let discs = 64 - board.empty_count();
    if discs > ENDGAME_DISCS {
        (board.empty_count() as u8).min(ENDGAME_DEPTH_CAP)
    } else if discs < OPENING_DISCS {
        OPENING_DEPTH.min(midgame_depth)
    } else {
        midgame_depth
    }
}

pub fn pick_best_move(
    board: &Board,
    depth: u8,
    nodes: &mut u64,
    limits: &SearchLimits,
) -> SearchOutcome {
    let mut tmp = *board;
    let moves = order_by_square_weight(&tmp);
    let Some(first) = moves.first() else {
        return SearchOutcome {
            best_move: None,
            stopped: false,
        };
    };

    let mut best = (Move::new(first.sq), -INF);
    let mut alpha = -INF;
    let mut stopped = false;

    for mv in &moves {
        let snapshot = tmp.make_move_with_flips(mv.sq, mv.flips);
        *nodes += 1;

        let (score, was_stopped) =
            alpha_beta(&mut tmp, depth.saturating_sub(1), -INF, -alpha, nodes, limits);
        let score = -score;
        tmp.unmake_move(snapshot);

        if was_stopped {
            stopped = true;
            break;
        }
        if score > best.1 {
            best = (Move::new(mv.sq), score);
        }
        alpha = alpha.max(score);
    }

    if best.1 == -INF {
        best.1 = evaluate_for_side_to_move(board);
    }
    SearchOutcome {
        best_move: Some(best),
        stopped,
    }
}

/// Returns (score, stopped) from the side to move's perspective.
fn alpha_beta(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
    limits: &SearchLimits,
) -> (i32, bool) {
    if limits.poll(*nodes) {
        return (evaluate_for_side_to_move(board), true);
    }
    if depth == 0 || board.is_game_over() {
        return (evaluate_for_side_to_move(board), false);
    }

    let moves = order_by_square_weight(board);
    if moves.is_empty() {
        let snapshot = board.pass();
        *nodes += 1;
        let (score, stopped) = alpha_beta(board, depth - 1, -beta, -alpha, nodes, limits);
        board.unmake_move(snapshot);
        return (-score, stopped);
    }

    let mut best = -INF;
    for mv in &moves {
        let snapshot = board.make_move_with_flips(mv.sq, mv.flips);
        *nodes += 1;

        let (score, stopped) = alpha_beta(board, depth - 1, -beta, -alpha, nodes, limits);
        let score = -score;
        board.unmake_move(snapshot);

        if stopped {
            return (best.max(score), true);
        }
        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }

    (best, false)
}

#[cfg(test)]
#[path = "alpha_beta_tests.rs"]
mod alpha_beta_tests;
