//! Zobrist hashing for Othello positions.
//!
//! A position hash is the XOR of one random key per occupied (side, square)
//! pair, plus a side key when black is to move. Because XOR is its own
//! inverse, a placement can be folded into an existing hash in time
//! proportional to the number of flipped discs instead of rehashing all 64
//! squares, which keeps hashing cheap at every search node.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::Side;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [side][square].
    pub discs: [[u64; 64]; 2],
    /// XORed in when black is to move.
    pub black_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x0F7E_11A5_D15C_0B0Au64;

        let mut discs = [[0u64; 64]; 2];
        let mut side = 0;
        while side < 2 {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                discs[side][sq] = state;
                sq += 1;
            }
            side += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        ZobristKeys {
            discs,
            black_to_move,
        }
    }

    #[inline(always)]
    pub fn disc_key(&self, side: Side, sq: u8) -> u64 {
        self.discs[side.idx()][sq as usize]
    }

    /// Hash of a full position, computed from scratch.
    pub fn hash(&self, board: &Board) -> u64 {
        let mut hash = 0u64;
        for sq in board.black {
            hash ^= self.disc_key(Side::Black, sq);
        }
        for sq in board.white {
            hash ^= self.disc_key(Side::White, sq);
        }
        if board.side_to_move == Side::Black {
            hash ^= self.black_to_move;
        }
        hash
    }

    /// Hash after `mover` places on `sq` and turns over `flipped`, given the
    /// hash before the move. The side to move toggles.
    #[inline]
    pub fn update(&self, hash: u64, sq: u8, flipped: Bitboard, mover: Side) -> u64 {
        let mut hash = hash ^ self.disc_key(mover, sq);
        let theirs = mover.other();
        for f in flipped {
            hash ^= self.disc_key(theirs, f) ^ self.disc_key(mover, f);
        }
        hash ^ self.black_to_move
    }

    /// Hash after a pass.
    #[inline(always)]
    pub fn pass(&self, hash: u64) -> u64 {
        hash ^ self.black_to_move
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
