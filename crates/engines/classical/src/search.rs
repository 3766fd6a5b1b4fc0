//! Iterative-deepening negamax with alpha-beta and a transposition table.
//!
//! Each iteration searches one ply deeper than the last, starting with the
//! previous best move. A budget that runs out mid-iteration throws that
//! iteration away; the answer is the best move of the deepest complete one.

use othello_core::eval::{evaluate_for_side_to_move, terminal_score, WIN_SCORE};
use othello_core::{Board, Move, SearchLimits, ZOBRIST};
use tracing::{debug, trace};

use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};

pub const INFINITY: i32 = 1_000_000;
pub const MAX_SEARCH_DEPTH: u8 = 12;
pub const ENDGAME_DEPTH: u8 = 16;
pub const OPENING_MAX_DEPTH: u8 = 10;
/// At or below this many empties the search goes for the endgame depth.
pub const ENDGAME_EMPTIES: u32 = 12;
/// Above this many empties the opening depth cap applies.
pub const OPENING_EMPTIES: u32 = 50;

/// Counters of one search, reset per move decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Expanded nodes
    pub nodes: u64,
    /// Beta cutoffs
    pub cutoffs: u64,
    /// Transposition table answers that avoided a search
    pub tt_cutoffs: u64,
    /// Deepest ply reached, passes included
    pub seldepth: u8,
    /// Deepest fully completed iteration
    pub completed_depth: u8,
}

/// Result of the iterative deepening loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationResult {
    pub best_move: Move,
    pub score: i32,
    pub stopped: bool,
}

/// Deepest iteration worth trying in this phase of the game.
pub fn max_depth_for(board: &Board, midgame_cap: u8) -> u8 {
    let empties = board.empty_count();
    if empties <= ENDGAME_EMPTIES {
        ENDGAME_DEPTH
    } else if empties > OPENING_EMPTIES {
        OPENING_MAX_DEPTH.min(midgame_cap)
    } else {
        midgame_cap
    }
}

pub struct Searcher<'a> {
    tt: &'a mut TranspositionTable,
    limits: &'a SearchLimits,
    stats: SearchStats,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(tt: &'a mut TranspositionTable, limits: &'a SearchLimits) -> Self {
        Self {
            tt,
            limits,
            stats: SearchStats::default(),
            stopped: false,
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Deepen from 1 to `max_depth`. The board must have a legal placement.
    pub fn iterate(&mut self, board: &Board, max_depth: u8) -> IterationResult {
        let mut board = *board;
        let hash = ZOBRIST.hash(&board);

        let ordered = order_moves(&board, self.tt.best_move(hash));
        let mut result = IterationResult {
            best_move: ordered
                .first()
                .map_or(Move::NONE, |m| Move::new(m.sq)),
            score: 0,
            stopped: false,
        };

        for depth in 1..=max_depth.max(1) {
            let Some((best_move, score)) = self.search_root(&mut board, depth, hash, result.best_move)
            else {
                result.stopped = true;
                debug!(depth, nodes = self.stats.nodes, "iteration abandoned");
                break;
            };
            result.best_move = best_move;
            result.score = score;
            self.stats.completed_depth = depth;
            debug!(
                depth,
                score,
                best = %best_move,
                nodes = self.stats.nodes,
                "iteration complete"
            );
            if score.abs() >= WIN_SCORE {
                break;
            }
        }
        result
    }

    /// One full-window root search. None if a budget ran out.
    fn search_root(
        &mut self,
        board: &mut Board,
        depth: u8,
        hash: u64,
        previous_best: Move,
    ) -> Option<(Move, i32)> {
        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;
        let mover = board.side_to_move;

        self.stats.nodes += 1;
        for mv in order_moves(board, Some(previous_best)) {
            let child = ZOBRIST.update(hash, mv.sq, mv.flips, mover);
            let snapshot = board.make_move_with_flips(mv.sq, mv.flips);
            let score = -self.negamax(board, depth - 1, 1, -INFINITY, -alpha, child);
            board.unmake_move(snapshot);

            if self.stopped {
                return None;
            }
            trace!(depth, mv = %Move::new(mv.sq), order = mv.score, score, "root move");
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((Move::new(mv.sq), score));
            }
            alpha = alpha.max(score);
        }

        let (best_move, score) = best?;
        self.tt.store(hash, score, best_move, depth, Bound::Exact);
        Some((best_move, score))
    }

    /// Score of `board` for the side to move, searched `depth` plies deep.
    ///
    /// Stored results are reused when the table can prove them. Once a budget
    /// runs out every call returns the static evaluation and nothing more is
    /// stored.
    pub fn negamax(
        &mut self,
        board: &mut Board,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        beta: i32,
        hash: u64,
    ) -> i32 {
        if self.stopped {
            return evaluate_for_side_to_move(board);
        }

        let probe = self.tt.probe(hash, depth, alpha, beta);
        if let Some(score) = probe.score {
            self.stats.tt_cutoffs += 1;
            return score;
        }

        // Budgets are checked on expansion only.
        self.stats.nodes += 1;
        if self.limits.poll(self.stats.nodes) {
            self.stopped = true;
            return evaluate_for_side_to_move(board);
        }
        self.stats.seldepth = self.stats.seldepth.max(ply);

        if depth == 0 {
            return evaluate_for_side_to_move(board);
        }

        let mover = board.side_to_move;
        if board.legal_moves().is_empty() {
            if board.opponent_moves().is_empty() {
                return terminal_score(board, mover);
            }
            let snapshot = board.pass();
            let score = -self.negamax(board, depth - 1, ply + 1, -beta, -alpha, ZOBRIST.pass(hash));
            board.unmake_move(snapshot);
            return score;
        }

        let alpha_orig = alpha;
        let mut best = -INFINITY;
        let mut best_move = Move::NONE;

        for mv in order_moves(board, probe.best_move) {
            let child = ZOBRIST.update(hash, mv.sq, mv.flips, mover);
            let snapshot = board.make_move_with_flips(mv.sq, mv.flips);
            let score = -self.negamax(board, depth - 1, ply + 1, -beta, -alpha, child);
            board.unmake_move(snapshot);

            if self.stopped {
                return best.max(score);
            }
            if score > best {
                best = score;
                best_move = Move::new(mv.sq);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(hash, best, best_move, depth, bound);
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
