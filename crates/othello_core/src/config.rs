//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! difficulty = "extreme"
//! move_time_ms = 5000
//! tt_size_mb = 64
//! seed = 42
//!
//! [book]
//! path = "data/books"
//! max_depth = 12
//! min_games = 2
//! randomness = 0.15
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::book::BookConfig;
use crate::error::ConfigError;
use crate::time_control::SearchLimits;

/// Strength tier. Each maps to one engine implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    #[default]
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty {s:?} (expected easy, normal, hard or extreme)"))
    }
}

/// Opening book location plus query tunables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookSettings {
    /// Database file or directory of `*.wtb` files. No book when unset.
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub config: BookConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    /// Wall-clock budget per move.
    pub move_time_ms: u64,
    /// Optional node budget per move, on top of each tier's own cap.
    pub node_limit: Option<u64>,
    /// Transposition table size for the Extreme tier.
    pub tt_size_mb: usize,
    /// Seed for random choices. Entropy when unset.
    pub seed: Option<u64>,
    pub normal_depth: u8,
    pub hard_depth: u8,
    pub hard_node_limit: u64,
    pub extreme_max_depth: u8,
    pub book: BookSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            move_time_ms: 15_000,
            node_limit: None,
            tt_size_mb: 64,
            seed: None,
            normal_depth: 4,
            hard_depth: 8,
            hard_node_limit: 500_000,
            extreme_max_depth: 12,
            book: BookSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Values the deserializer accepts but the engines cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let randomness = self.book.config.randomness;
        if !(0.0..=1.0).contains(&randomness) {
            return Err(ConfigError::BookRandomness(randomness));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    /// Per-move limits: the configured time, plus the node budget if any.
    pub fn search_limits(&self) -> SearchLimits {
        let limits = SearchLimits::time(self.move_time());
        match self.node_limit {
            Some(nodes) => limits.with_node_limit(nodes),
            None => limits,
        }
    }
}
