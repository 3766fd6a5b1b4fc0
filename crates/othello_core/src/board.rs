use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::ParseBoardError;
use crate::movegen::{flips, legal_moves};
use crate::types::{Move, Side};
use crate::zobrist::ZOBRIST;

/// A game position: one occupancy mask per side plus the side to move.
///
/// The masks are always disjoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub black: Bitboard,
    pub white: Bitboard,
    pub side_to_move: Side,
}

/// Everything needed to undo one `make_move` in O(1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    black: Bitboard,
    white: Bitboard,
    side_to_move: Side,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// White on d4 and e5, black on e4 and d5, black to move.
    pub fn startpos() -> Self {
        Self {
            black: Bitboard::from_square(28) | Bitboard::from_square(35),
            white: Bitboard::from_square(27) | Bitboard::from_square(36),
            side_to_move: Side::Black,
        }
    }

    /// Builds a board from raw masks, rejecting overlapping discs.
    pub fn from_masks(
        black: Bitboard,
        white: Bitboard,
        side_to_move: Side,
    ) -> Result<Self, ParseBoardError> {
        let overlap = (black & white).popcount();
        if overlap != 0 {
            return Err(ParseBoardError::Overlap(overlap));
        }
        Ok(Self {
            black,
            white,
            side_to_move,
        })
    }

    #[inline(always)]
    pub fn discs(&self, side: Side) -> Bitboard {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// Discs of the side to move.
    #[inline(always)]
    pub fn player(&self) -> Bitboard {
        self.discs(self.side_to_move)
    }

    /// Discs of the side not to move.
    #[inline(always)]
    pub fn opponent(&self) -> Bitboard {
        self.discs(self.side_to_move.other())
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline(always)]
    pub fn empties(&self) -> Bitboard {
        !self.occupied()
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn disc_count(&self, side: Side) -> u32 {
        self.discs(side).popcount()
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        64 - self.occupied().popcount()
    }

    /// `side`'s discs minus the other side's.
    #[inline]
    pub fn disc_difference(&self, side: Side) -> i32 {
        self.disc_count(side) as i32 - self.disc_count(side.other()) as i32
    }

    /// Legal placements for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> Bitboard {
        legal_moves(self.player(), self.opponent())
    }

    /// Legal placements the opponent would have if it were their turn.
    #[inline]
    pub fn opponent_moves(&self) -> Bitboard {
        legal_moves(self.opponent(), self.player())
    }

    /// Discs the side to move would flip by placing on `sq`.
    #[inline]
    pub fn flips(&self, sq: u8) -> Bitboard {
        flips(self.player(), self.opponent(), sq)
    }

    /// The side to move has no placement but the opponent does.
    pub fn must_pass(&self) -> bool {
        self.legal_moves().is_empty() && !self.opponent_moves().is_empty()
    }

    /// Neither side can place a disc.
    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty() && self.opponent_moves().is_empty()
    }

    /// Side with more discs once the game is over. None while the game is
    /// still running and for a draw.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_game_over() {
            return None;
        }
        match self.disc_difference(Side::Black) {
            d if d > 0 => Some(Side::Black),
            d if d < 0 => Some(Side::White),
            _ => None,
        }
    }

    /// Whether `mv` is accepted by [`Board::make_move`].
    pub fn is_legal(&self, mv: Move) -> bool {
        match mv.square() {
            Some(sq) => !self.flips(sq).is_empty(),
            None => mv.is_pass() && self.must_pass(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            black: self.black,
            white: self.white,
            side_to_move: self.side_to_move,
        }
    }

    /// Applies `mv` for the side to move.
    ///
    /// Placements that flip nothing, occupied squares, `Move::NONE`, and a
    /// pass while a placement exists are rejected with the board unchanged.
    pub fn make_move(&mut self, mv: Move) -> Option<Snapshot> {
        match mv.square() {
            Some(sq) => {
                let flipped = self.flips(sq);
                if flipped.is_empty() {
                    return None;
                }
                Some(self.make_move_with_flips(sq, flipped))
            }
            None if mv.is_pass() && self.must_pass() => Some(self.pass()),
            None => None,
        }
    }

    /// Places on `sq` and turns over `flipped` without validation.
    ///
    /// `flipped` must be the non-empty result of [`Board::flips`] for `sq`.
    #[inline]
    pub fn make_move_with_flips(&mut self, sq: u8, flipped: Bitboard) -> Snapshot {
        let snapshot = self.snapshot();
        let placed = Bitboard::from_square(sq);
        match self.side_to_move {
            Side::Black => {
                self.black |= placed | flipped;
                self.white ^= flipped;
            }
            Side::White => {
                self.white |= placed | flipped;
                self.black ^= flipped;
            }
        }
        self.side_to_move = self.side_to_move.other();
        snapshot
    }

    /// Hands the turn to the opponent without validation.
    #[inline]
    pub fn pass(&mut self) -> Snapshot {
        let snapshot = self.snapshot();
        self.side_to_move = self.side_to_move.other();
        snapshot
    }

    #[inline]
    pub fn unmake_move(&mut self, snapshot: Snapshot) {
        self.black = snapshot.black;
        self.white = snapshot.white;
        self.side_to_move = snapshot.side_to_move;
    }

    /// Applies `mv` and reports whether it was accepted.
    pub fn play(&mut self, mv: Move) -> bool {
        self.make_move(mv).is_some()
    }

    /// Zobrist hash of the position including the side to move.
    #[inline]
    pub fn hash(&self) -> u64 {
        ZOBRIST.hash(self)
    }
}

/// Parses 64 cells (`X`/`B`/`*` black, `O`/`W` white, `-`/`.` empty, whitespace
/// ignored) optionally followed, after whitespace, by the side to move
/// (`black`, `white`, `b`, `w`, `x`, `o`). Black moves when no side is given.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        let mut cells = 0u8;
        let mut rest = "";

        for (idx, c) in s.char_indices() {
            if cells == 64 {
                rest = &s[idx..];
                break;
            }
            match c {
                c if c.is_whitespace() => continue,
                'X' | 'x' | 'B' | 'b' | '*' => black.set(cells),
                'O' | 'o' | 'W' | 'w' => white.set(cells),
                '-' | '.' => {}
                other => return Err(ParseBoardError::BadCell(other)),
            }
            cells += 1;
        }
        if cells != 64 {
            return Err(ParseBoardError::WrongCellCount(cells as usize));
        }
        // The side token must be separated from the cells.
        if rest.starts_with(|c: char| !c.is_whitespace()) {
            let extra = rest.chars().take_while(|c| !c.is_whitespace()).count();
            return Err(ParseBoardError::WrongCellCount(64 + extra));
        }

        let side = match rest.trim().to_ascii_lowercase().as_str() {
            "" | "black" | "b" | "x" => Side::Black,
            "white" | "w" | "o" => Side::White,
            other => return Err(ParseBoardError::BadSide(other.to_string())),
        };
        Ok(Board {
            black,
            white,
            side_to_move: side,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let sq = rank * 8 + file;
                let c = if self.black.contains(sq) {
                    'X'
                } else if self.white.contains(sq) {
                    'O'
                } else {
                    '-'
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.side_to_move)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
