pub mod bitboard;
pub mod board;
pub mod book;
pub mod config;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use bitboard::*;
pub use board::*;
pub use book::{BookConfig, BookLoadReport, BookMove, BookStats, OpeningBook};
pub use config::{BookSettings, Difficulty, EngineConfig};
pub use error::{BookError, ConfigError, ParseBoardError};
pub use eval::{evaluate, evaluate_for_side_to_move, WIN_SCORE};
pub use movegen::*;
pub use perft::{perft, perft_hashed};
pub use time_control::*;
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait, implemented by every difficulty tier
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `Move::PASS` when the side to move must pass, `Move::NONE` when the
    /// game is over.
    pub best_move: Move,
    /// Evaluation from the side to move's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    pub nodes: u64,
    /// Whether a budget ran out before the search finished
    pub stopped: bool,
    /// The move came from the opening book
    pub from_book: bool,
}

impl SearchResult {
    /// Answer that needed no search: a forced move, a pass, or game over.
    pub fn immediate(best_move: Move) -> Self {
        Self {
            best_move,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
            from_book: false,
        }
    }
}

/// Forced answers shared by every engine: `Move::NONE` when the game is
/// over, `Move::PASS` when the side to move has no placement.
pub fn forced_reply(board: &Board) -> Option<SearchResult> {
    if !board.legal_moves().is_empty() {
        return None;
    }
    if board.opponent_moves().is_empty() {
        Some(SearchResult::immediate(Move::NONE))
    } else {
        Some(SearchResult::immediate(Move::PASS))
    }
}

/// A move-decision strategy.
///
/// Engines search a private copy of the caller's board, so the board passed
/// in is never modified.
pub trait Engine: Send {
    /// Choose a move for the side to move within `limits`.
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult;

    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables etc.)
    fn new_game(&mut self) {}
}
