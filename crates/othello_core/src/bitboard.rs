//! 64-bit square sets for an 8×8 Othello board.
//!
//! Squares are numbered row-major: bit `row * 8 + col`, so bit 0 is a1 in the
//! top-left corner, bit 7 is h1 and bit 63 is h8. Rows are called ranks and
//! columns files, with "north" meaning towards higher ranks.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    pub const NOT_FILE_A: Bitboard = Bitboard(!0x0101010101010101);
    pub const NOT_FILE_H: Bitboard = Bitboard(!0x8080808080808080);

    /// a1, h1, a8, h8.
    pub const CORNERS: Bitboard = Bitboard(0x8100000000000081);
    /// The outer ring, corners included.
    pub const EDGES: Bitboard = Bitboard(0xFF818181818181FF);
    /// Squares diagonally adjacent to a corner: b2, g2, b7, g7.
    pub const X_SQUARES: Bitboard = Bitboard(0x0042000000004200);
    /// Edge squares orthogonally adjacent to a corner.
    pub const C_SQUARES: Bitboard = Bitboard(0x4281000000008142);

    /// Create a bitboard with a single square set.
    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u64 << sq)) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u64 << sq;
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u64 << sq);
    }

    /// Number of squares in the set.
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the lowest set square.
    ///
    /// The result is meaningless for an empty set; callers must check first.
    /// Debug builds assert on it.
    #[inline(always)]
    pub fn bit_scan_forward(self) -> u8 {
        debug_assert!(self.0 != 0, "bit_scan_forward on an empty bitboard");
        self.0.trailing_zeros() as u8
    }

    /// Remove and return the lowest set square, or None if empty.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(sq)
        }
    }

    /// Move every square one step in `dir`, dropping squares that would leave
    /// the board or wrap onto the opposite file.
    #[inline(always)]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        Bitboard(raw_shift(self.0, dir.delta()) & dir.wrap_mask())
    }

    /// Squares adjacent (in any of the 8 directions) to a square in the set.
    pub const fn neighbours(self) -> Bitboard {
        let mut out = 0u64;
        let mut i = 0;
        while i < Direction::ALL.len() {
            out |= self.shift(Direction::ALL[i]).0;
            i += 1;
        }
        Bitboard(out)
    }
}

/// One of the 8 ray directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Signed change in square index for one step.
    #[inline(always)]
    pub const fn delta(self) -> i32 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    /// Change in (file, rank) for one step.
    pub const fn file_rank_delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Mask applied after a raw shift. A step towards file h can only wrap
    /// onto file a, and vice versa.
    #[inline(always)]
    pub const fn wrap_mask(self) -> u64 {
        match self {
            Direction::East | Direction::NorthEast | Direction::SouthEast => {
                Bitboard::NOT_FILE_A.0
            }
            Direction::West | Direction::NorthWest | Direction::SouthWest => {
                Bitboard::NOT_FILE_H.0
            }
            Direction::North | Direction::South => !0,
        }
    }
}

#[inline(always)]
pub(crate) const fn raw_shift(x: u64, amount: i32) -> u64 {
    if amount >= 0 {
        x << amount
    } else {
        x >> -amount
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

/// Iterates set squares from lowest to highest.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lsb()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let c = if self.contains(rank * 8 + file) { 'x' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
