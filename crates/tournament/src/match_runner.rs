//! Match runner for playing games between engines

use std::time::Duration;

use othello_core::{Board, Engine, Move, SearchLimits, Side};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::results::{GameRecord, MatchReport};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Depth cap per move
    pub depth: u8,
    /// Maximum time per move (None = no limit)
    pub move_time_ms: Option<u64>,
    /// Maximum nodes per move (None = no limit)
    pub node_limit: Option<u64>,
    /// Random plies played before the engines take over
    pub opening_plies: usize,
    /// Whether to alternate colors each game. Consecutive pairs of games
    /// share an opening with the colors swapped.
    pub alternate_colors: bool,
    /// Seed for the random openings
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: u8::MAX,
            move_time_ms: Some(1_000),
            node_limit: None,
            opening_plies: 2,
            alternate_colors: true,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Create search limits based on this config
    pub fn search_limits(&self) -> SearchLimits {
        let limits = match self.move_time_ms {
            Some(ms) => SearchLimits::depth_and_time(self.depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(self.depth),
        };
        match self.node_limit {
            Some(nodes) => limits.with_node_limit(nodes),
            None => limits,
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Results are from engine1's perspective; engine1 takes black in the
    /// first game.
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchReport {
        let mut report = MatchReport::new(engine1.name(), engine2.name(), self.config.clone());

        for game_num in 0..self.config.num_games {
            let engine1_black = !self.config.alternate_colors || game_num % 2 == 0;
            let opening_index = if self.config.alternate_colors {
                game_num / 2
            } else {
                game_num
            };
            let start = self.random_opening(opening_index);

            let game = if engine1_black {
                self.play_game(engine1, engine2, start)
            } else {
                self.play_game(engine2, engine1, start)
            };

            let engine1_side = if engine1_black { Side::Black } else { Side::White };
            report.result.record(game.result_for(engine1_side));

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                black = %game.black,
                white = %game.white,
                discs = %format!("{}-{}", game.black_discs, game.white_discs),
                wins = report.result.wins,
                losses = report.result.losses,
                draws = report.result.draws,
                "game finished"
            );
            report.games.push(game);
        }

        report
    }

    /// Start position after `opening_plies` random legal plies, the same for
    /// a given index.
    pub fn random_opening(&self, index: u32) -> Board {
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(index as u64));
        let mut board = Board::startpos();
        for _ in 0..self.config.opening_plies {
            if board.is_game_over() {
                break;
            }
            if board.must_pass() {
                board.pass();
                continue;
            }
            if let Some(sq) = board.legal_moves().choose(&mut rng) {
                board.play(Move::new(sq));
            }
        }
        board
    }

    /// Play one game from `start` to the end.
    ///
    /// A move the board rejects forfeits the game for the side that made it.
    pub fn play_game(&self, black: &mut dyn Engine, white: &mut dyn Engine, start: Board) -> GameRecord {
        black.new_game();
        white.new_game();

        let mut board = start;
        let mut record = GameRecord {
            black: black.name().to_string(),
            white: white.name().to_string(),
            moves: Vec::new(),
            opening_plies: self.config.opening_plies,
            black_discs: 0,
            white_discs: 0,
            winner: None,
            forfeit: None,
        };

        while !board.is_game_over() {
            let mover = board.side_to_move();
            // Fresh limits for each move (resets the clock)
            let limits = self.config.search_limits();
            let result = match mover {
                Side::Black => black.search(&board, limits),
                Side::White => white.search(&board, limits),
            };

            if !board.play(result.best_move) {
                warn!(side = %mover, mv = %result.best_move, "illegal move, game forfeited");
                record.forfeit = Some(mover);
                record.winner = Some(mover.other());
                break;
            }
            record.moves.push(result.best_move.to_string());
        }

        record.black_discs = board.disc_count(Side::Black);
        record.white_discs = board.disc_count(Side::White);
        if record.forfeit.is_none() {
            record.winner = board.winner();
        }
        record
    }
}

/// Quick utility to run a single match with the default settings
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> MatchReport {
    let config = MatchConfig {
        num_games,
        depth,
        move_time_ms: None,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
