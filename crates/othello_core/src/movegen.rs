//! Legal move and flip computation.
//!
//! Legal moves for all directions are found with Kogge-Stone occluded fills:
//! three doubling rounds per direction cover the longest possible run of six
//! opponent discs, with no per-square loop. Flips for a single placement walk
//! each ray one step at a time, since only one square is involved.

use crate::bitboard::{raw_shift, Bitboard, Direction};
use crate::board::Board;
use crate::types::Move;

/// Fill from `seeds` through contiguous `pro` squares in `dir`.
#[inline(always)]
fn occluded_fill(seeds: u64, pro: u64, dir: Direction) -> u64 {
    let d = dir.delta();
    let mut fill = seeds;
    let mut pro = pro & dir.wrap_mask();
    fill |= pro & raw_shift(fill, d);
    pro &= raw_shift(pro, d);
    fill |= pro & raw_shift(fill, 2 * d);
    pro &= raw_shift(pro, 2 * d);
    fill |= pro & raw_shift(fill, 4 * d);
    fill
}

/// Empty squares where `player` may place a disc against `opponent`.
#[inline]
pub fn legal_moves(player: Bitboard, opponent: Bitboard) -> Bitboard {
    let empty = !(player.0 | opponent.0);
    let mut moves = 0u64;
    for dir in Direction::ALL {
        let run = occluded_fill(player.0, opponent.0, dir) & opponent.0;
        moves |= raw_shift(run, dir.delta()) & dir.wrap_mask() & empty;
    }
    Bitboard(moves)
}

/// Opponent discs turned over by `player` placing on `sq`.
///
/// Returns the empty set when `sq` is off the board or occupied, and when no
/// line is closed; an empty result means the placement is illegal.
#[inline]
pub fn flips(player: Bitboard, opponent: Bitboard, sq: u8) -> Bitboard {
    if sq >= 64 {
        return Bitboard::EMPTY;
    }
    let placed = Bitboard::from_square(sq);
    if !((player | opponent) & placed).is_empty() {
        return Bitboard::EMPTY;
    }

    let mut flipped = Bitboard::EMPTY;
    for dir in Direction::ALL {
        let mut line = Bitboard::EMPTY;
        let mut cursor = placed.shift(dir);
        while !(cursor & opponent).is_empty() {
            line |= cursor;
            cursor = cursor.shift(dir);
        }
        if !(cursor & player).is_empty() {
            flipped |= line;
        }
    }
    flipped
}

/// Appends the side to move's legal placements to `out`.
///
/// Passes are not included; an empty result means the side must pass or the
/// game is over.
pub fn legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    out.extend(board.legal_moves().map(Move::new));
}

/// Convenience wrapper returning a fresh vector.
pub fn legal_move_list(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(32);
    legal_moves_into(board, &mut moves);
    moves
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
