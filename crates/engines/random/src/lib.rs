//! Random Move Othello Engine
//!
//! Picks uniformly among the legal placements. It is the Easy difficulty and
//! a baseline that any searching engine should beat.

use othello_core::{
    forced_reply, legal_moves_into, Board, Engine, Move, SearchLimits, SearchResult,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// An engine that plays random legal moves, passing only when forced.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves: Vec<Move>,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible move choices.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            moves: Vec::with_capacity(32),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, _limits: SearchLimits) -> SearchResult {
        if let Some(reply) = forced_reply(board) {
            return reply;
        }

        self.moves.clear();
        legal_moves_into(board, &mut self.moves);
        let mut result = match self.moves.choose(&mut self.rng) {
            Some(&mv) => SearchResult::immediate(mv),
            None => SearchResult::immediate(Move::NONE),
        };
        result.depth = 1;
        result.nodes = 1;
        result
    }

    fn name(&self) -> &str {
        "Random"
    }
}
