//! Game and match results, JSON storage and text reports

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use othello_core::Side;
use serde::{Deserialize, Serialize};

use crate::match_runner::MatchConfig;

/// Result of a single game from one engine's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn reverse(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Result of a match (multiple games), from engine1's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Engine playing black
    pub black: String,
    /// Engine playing white
    pub white: String,
    /// Every ply in order, "pass" included
    pub moves: Vec<String>,
    /// Plies played at random before the engines took over
    pub opening_plies: usize,
    pub black_discs: u32,
    pub white_discs: u32,
    /// None for a draw
    pub winner: Option<Side>,
    /// Side that lost by playing an illegal move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forfeit: Option<Side>,
}

impl GameRecord {
    /// Outcome for the engine that played `side`.
    pub fn result_for(&self, side: Side) -> GameResult {
        match self.winner {
            Some(winner) if winner == side => GameResult::Win,
            Some(_) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }
}

/// A complete match: configuration, summary and every game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub engine1: String,
    pub engine2: String,
    pub config: MatchConfig,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    pub fn new(engine1: &str, engine2: &str, config: MatchConfig) -> Self {
        Self {
            engine1: engine1.to_string(),
            engine2: engine2.to_string(),
            config,
            result: MatchResult::new(),
            games: Vec::new(),
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize match report")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse match report {}", path.display()))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "=== Match: {} vs {} ===", self.engine1, self.engine2);
        let _ = writeln!(
            report,
            "Games: {}, random opening plies: {}\n",
            self.config.num_games, self.config.opening_plies
        );
        let _ = writeln!(
            report,
            "{:>4}  {:<12} {:<12} {:>7}  {}",
            "Game", "Black", "White", "Discs", "Winner"
        );
        report.push_str(&"-".repeat(50));
        report.push('\n');

        for (i, game) in self.games.iter().enumerate() {
            let winner = match (game.winner, game.forfeit) {
                (Some(side), Some(_)) => format!("{side} (forfeit)"),
                (Some(side), None) => side.to_string(),
                (None, _) => "draw".to_string(),
            };
            let _ = writeln!(
                report,
                "{:>4}  {:<12} {:<12} {:>3}-{:<3}  {}",
                i + 1,
                game.black,
                game.white,
                game.black_discs,
                game.white_discs,
                winner
            );
        }

        let _ = writeln!(
            report,
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%)",
            self.engine1,
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        );
        report
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
