//! Move ordering heuristics. Ordering only changes how much alpha-beta can
//! prune, never the result of a full-width search.

use othello_core::eval::SQUARE_WEIGHTS;
use othello_core::{legal_moves, Bitboard, Board, Move};

const CORNER_BONUS: i32 = 10_000;
const X_SQUARE_PENALTY: i32 = -5_000;
const EDGE_BONUS: i32 = 100;
const FLIP_WEIGHT: i32 = 10;
const REPLY_WEIGHT: i32 = 5;

/// A placement with its precomputed flips and ordering score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub sq: u8,
    pub flips: Bitboard,
    pub score: i32,
}

/// Heuristic value of placing on `sq`: corners first, X-squares last, edges
/// slightly favoured; more flips and fewer opponent replies are better.
pub fn score_move(board: &Board, sq: u8, flips: Bitboard) -> i32 {
    let mut score = if Bitboard::CORNERS.contains(sq) {
        CORNER_BONUS
    } else if Bitboard::X_SQUARES.contains(sq) {
        X_SQUARE_PENALTY
    } else if Bitboard::EDGES.contains(sq) {
        EDGE_BONUS
    } else {
        0
    };
    score += FLIP_WEIGHT * flips.popcount() as i32;

    let mine = board.player() | flips | Bitboard::from_square(sq);
    let theirs = board.opponent() & !flips;
    score -= REPLY_WEIGHT * legal_moves(theirs, mine).popcount() as i32;
    score
}

/// Legal placements of the side to move, best first. `first`, if legal, is
/// moved to the front regardless of its score.
pub fn order_moves(board: &Board, first: Option<Move>) -> Vec<ScoredMove> {
    let mut moves: Vec<ScoredMove> = board
        .legal_moves()
        .map(|sq| {
            let flips = board.flips(sq);
            ScoredMove {
                sq,
                flips,
                score: score_move(board, sq, flips),
            }
        })
        .collect();
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    promote(&mut moves, first);
    moves
}

/// Legal placements ordered by the square table only.
pub fn order_by_square_weight(board: &Board) -> Vec<ScoredMove> {
    let mut moves: Vec<ScoredMove> = board
        .legal_moves()
        .map(|sq| ScoredMove {
            sq,
            flips: board.flips(sq),
            score: SQUARE_WEIGHTS[sq as usize],
        })
        .collect();
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves
}

fn promote(moves: &mut [ScoredMove], first: Option<Move>) {
    let Some(sq) = first.and_then(Move::square) else {
        return;
    };
    if let Some(pos) = moves.iter().position(|m| m.sq == sq) {
        moves[..=pos].rotate_right(1);
    }
}
