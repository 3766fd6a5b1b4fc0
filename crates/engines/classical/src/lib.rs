//! Search-based Othello engines
//!
//! Three strength tiers sharing the board, move generator and evaluator from
//! `othello_core`:
//! - [`MinimaxEngine`]: fixed-depth minimax without pruning
//! - [`AlphaBetaEngine`]: alpha-beta with phase-dependent depth and a node cap
//! - [`NegamaxEngine`]: iterative deepening with a transposition table,
//!   move ordering and an optional opening book

mod alpha_beta;
mod minimax;
pub mod ordering;
pub mod search;
pub mod tt;

use std::sync::Arc;

use othello_core::{forced_reply, Board, Engine, Move, OpeningBook, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use alpha_beta::phase_depth;
pub use search::{max_depth_for, SearchStats, Searcher};
pub use tt::{Bound, TranspositionTable, TtStats};

/// Best move of a fixed-depth search and whether a budget cut it short.
pub struct SearchOutcome {
    /// Best move found with its score (None if no legal placement)
    pub best_move: Option<(Move, i32)>,
    pub stopped: bool,
}

fn outcome_to_result(outcome: SearchOutcome, depth: u8, nodes: u64) -> SearchResult {
    let (best_move, score) = outcome.best_move.unwrap_or((Move::NONE, 0));
    SearchResult {
        best_move,
        score,
        depth,
        nodes,
        stopped: outcome.stopped,
        from_book: false,
    }
}

/// Normal tier: every line to a fixed depth.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    depth: u8,
    nodes: u64,
}

impl MinimaxEngine {
    pub const DEFAULT_DEPTH: u8 = 4;

    pub fn new() -> Self {
        Self::with_depth(Self::DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            nodes: 0,
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        if let Some(reply) = forced_reply(board) {
            return reply;
        }
        self.nodes = 0;
        limits.start();

        let depth = self.depth.min(limits.depth.max(1));
        let outcome = minimax::pick_best_move(board, depth, &mut self.nodes, &limits);
        outcome_to_result(outcome, depth, self.nodes)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Hard tier: alpha-beta, deeper towards the end of the game, capped in
/// nodes.
#[derive(Debug, Clone)]
pub struct AlphaBetaEngine {
    depth: u8,
    node_limit: u64,
    nodes: u64,
}

impl AlphaBetaEngine {
    pub const DEFAULT_DEPTH: u8 = 8;
    pub const DEFAULT_NODE_LIMIT: u64 = 500_000;

    pub fn new() -> Self {
        Self::with_settings(Self::DEFAULT_DEPTH, Self::DEFAULT_NODE_LIMIT)
    }

    pub fn with_settings(depth: u8, node_limit: u64) -> Self {
        Self {
            depth: depth.max(1),
            node_limit,
            nodes: 0,
        }
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        if let Some(reply) = forced_reply(board) {
            return reply;
        }
        self.nodes = 0;
        let limits = limits.with_node_limit(self.node_limit);
        limits.start();

        let depth = phase_depth(board, self.depth).min(limits.depth).max(1);
        let outcome = alpha_beta::pick_best_move(board, depth, &mut self.nodes, &limits);
        outcome_to_result(outcome, depth, self.nodes)
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Extreme tier: iterative-deepening negamax with a transposition table and
/// an optional opening book.
pub struct NegamaxEngine {
    tt: TranspositionTable,
    book: Option<Arc<OpeningBook>>,
    rng: StdRng,
    max_depth: u8,
    last_stats: SearchStats,
}

impl NegamaxEngine {
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_size_mb),
            book: None,
            rng: StdRng::from_entropy(),
            max_depth: search::MAX_SEARCH_DEPTH,
            last_stats: SearchStats::default(),
        }
    }

    pub fn with_book(mut self, book: Arc<OpeningBook>) -> Self {
        self.book = Some(book);
        self
    }

    /// Fix the seed used for book move choices.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Midgame iteration cap. The endgame depth is not affected.
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    pub fn tt_stats(&self) -> TtStats {
        self.tt.stats()
    }

    fn book_move(&mut self, board: &Board) -> Option<Move> {
        let book = self.book.as_ref()?;
        let ply = (60 - board.empty_count()) as usize;
        let mv = book.probe(board, ply, &mut self.rng)?;
        // A book built with a different move code convention can disagree.
        board.is_legal(mv).then_some(mv)
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(tt::DEFAULT_TT_SIZE_MB)
    }
}

impl Engine for NegamaxEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        self.last_stats = SearchStats::default();
        if let Some(reply) = forced_reply(board) {
            return reply;
        }

        let moves = board.legal_moves();
        if moves.popcount() == 1 {
            return SearchResult::immediate(Move::new(moves.bit_scan_forward()));
        }

        if let Some(mv) = self.book_move(board) {
            debug!(%mv, "book move");
            return SearchResult {
                from_book: true,
                ..SearchResult::immediate(mv)
            };
        }

        limits.start();
        self.tt.new_search();
        let max_depth = max_depth_for(board, self.max_depth).min(limits.depth);

        let mut searcher = Searcher::new(&mut self.tt, &limits);
        let result = searcher.iterate(board, max_depth);
        self.last_stats = searcher.stats();

        let tt = self.tt.stats();
        debug!(
            depth = self.last_stats.completed_depth,
            nodes = self.last_stats.nodes,
            cutoffs = self.last_stats.cutoffs,
            seldepth = self.last_stats.seldepth,
            tt_hit_rate = tt.hit_rate(),
            tt_collisions = tt.collisions,
            "search finished"
        );

        SearchResult {
            best_move: result.best_move,
            score: result.score,
            depth: self.last_stats.completed_depth,
            nodes: self.last_stats.nodes,
            stopped: result.stopped,
            from_book: false,
        }
    }

    fn name(&self) -> &str {
        "Negamax"
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.last_stats = SearchStats::default();
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
