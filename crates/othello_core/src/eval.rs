//! Static position evaluation.
//!
//! Scores are from the perspective of one side, higher is better. The blend
//! shifts with the number of empty squares: mobility and frontier matter most
//! early, stability and disc parity late. Finished games bypass the blend and
//! score beyond anything the heuristics can reach.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::Side;

/// Base score of a won game. Every non-terminal evaluation stays well below.
pub const WIN_SCORE: i32 = 100_000;

pub const CORNER_WEIGHT: i32 = 100;
pub const STABILITY_WEIGHT: i32 = 15;
pub const STABILITY_EMPTIES: u32 = 40;

/// Piece-square table, row-major from a1.
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i32; 64] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,   5,   1,   1,   5,  -2,  10,
      5,  -2,   1,   1,   1,   1,  -2,   5,
      5,  -2,   1,   1,   1,   1,  -2,   5,
     10,  -2,   5,   1,   1,   5,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Evaluate `board` for `side`.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    if board.is_game_over() {
        return terminal_score(board, side);
    }
    breakdown(board, side).total()
}

/// Evaluate for the side to move, as negamax expects.
#[inline]
pub fn evaluate_for_side_to_move(board: &Board) -> i32 {
    evaluate(board, board.side_to_move)
}

/// Final score of a finished game: the sign of the disc difference, with a
/// magnitude above every heuristic score. Larger wins score higher.
pub fn terminal_score(board: &Board, side: Side) -> i32 {
    let diff = board.disc_difference(side);
    match diff.signum() {
        1 => WIN_SCORE + diff,
        -1 => -WIN_SCORE + diff,
        _ => 0,
    }
}

/// Individual heuristic terms, already weighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub positional: i32,
    pub mobility: i32,
    pub corners: i32,
    pub stability: i32,
    pub frontier: i32,
    pub parity: i32,
}

impl EvalBreakdown {
    pub fn total(&self) -> i32 {
        self.positional + self.mobility + self.corners + self.stability + self.frontier + self.parity
    }
}

impl fmt::Display for EvalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "positional {:>6}", self.positional)?;
        writeln!(f, "mobility   {:>6}", self.mobility)?;
        writeln!(f, "corners    {:>6}", self.corners)?;
        writeln!(f, "stability  {:>6}", self.stability)?;
        writeln!(f, "frontier   {:>6}", self.frontier)?;
        writeln!(f, "parity     {:>6}", self.parity)?;
        write!(f, "total      {:>6}", self.total())
    }
}

/// Weighted heuristic terms for `side`, ignoring whether the game is over.
pub fn breakdown(board: &Board, side: Side) -> EvalBreakdown {
    let mine = board.discs(side);
    let theirs = board.discs(side.other());
    let empties = board.empty_count() as i32;

    EvalBreakdown {
        positional: positional(mine) - positional(theirs),
        mobility: mobility(mine, theirs) * (5 + empties / 4),
        corners: corners(mine, theirs) * CORNER_WEIGHT,
        stability: if (empties as u32) < STABILITY_EMPTIES {
            stability(mine, theirs) * STABILITY_WEIGHT
        } else {
            0
        },
        frontier: frontier(board, mine, theirs) * (2 + empties / 10),
        parity: board.disc_difference(side) * (24 - empties).max(1),
    }
}

/// Sum of the square table over `discs`.
pub fn positional(discs: Bitboard) -> i32 {
    discs.map(|sq| SQUARE_WEIGHTS[sq as usize]).sum()
}

/// Own legal moves minus the opponent's.
pub fn mobility(mine: Bitboard, theirs: Bitboard) -> i32 {
    legal_moves(mine, theirs).popcount() as i32 - legal_moves(theirs, mine).popcount() as i32
}

/// Own corners minus the opponent's.
pub fn corners(mine: Bitboard, theirs: Bitboard) -> i32 {
    (mine & Bitboard::CORNERS).popcount() as i32 - (theirs & Bitboard::CORNERS).popcount() as i32
}

/// Edge stability proxy: corners count five, other edge discs one.
pub fn stability(mine: Bitboard, theirs: Bitboard) -> i32 {
    let score = |discs: Bitboard| {
        5 * (discs & Bitboard::CORNERS).popcount() as i32
            + (discs & Bitboard::EDGES & !Bitboard::CORNERS).popcount() as i32
    };
    score(mine) - score(theirs)
}

/// Opponent frontier discs minus own; a disc next to an empty square is a
/// liability.
pub fn frontier(board: &Board, mine: Bitboard, theirs: Bitboard) -> i32 {
    let near_empty = board.empties().neighbours();
    (theirs & near_empty).popcount() as i32 - (mine & near_empty).popcount() as i32
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
