//! Engine construction for each difficulty tier.

use std::sync::Arc;

use classical_engine::{AlphaBetaEngine, MinimaxEngine, NegamaxEngine};
use othello_core::{BookSettings, Difficulty, Engine, EngineConfig, OpeningBook};
use random_engine::RandomEngine;
use tracing::{info, warn};

/// Build the engine for `difficulty`. Only the Extreme tier consults `book`.
pub fn create_engine(
    difficulty: Difficulty,
    config: &EngineConfig,
    book: Option<Arc<OpeningBook>>,
) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Easy => match config.seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
        Difficulty::Normal => Box::new(MinimaxEngine::with_depth(config.normal_depth)),
        Difficulty::Hard => Box::new(AlphaBetaEngine::with_settings(
            config.hard_depth,
            config.hard_node_limit,
        )),
        Difficulty::Extreme => {
            let mut engine =
                NegamaxEngine::new(config.tt_size_mb).with_max_depth(config.extreme_max_depth);
            if let Some(seed) = config.seed {
                engine = engine.with_seed(seed);
            }
            if let Some(book) = book {
                engine = engine.with_book(book);
            }
            Box::new(engine)
        }
    }
}

/// Load the configured opening book. None when no path is set or nothing
/// could be read; the engines then search from the first move.
pub fn load_book(settings: &BookSettings) -> Option<Arc<OpeningBook>> {
    let path = settings.path.as_ref()?;
    let mut book = OpeningBook::with_config(settings.config.clone());
    let games = book.load_path(path);
    if book.is_empty() {
        warn!(path = %path.display(), "opening book is empty, searching from the first move");
        return None;
    }
    info!(games, "opening book loaded");
    Some(Arc::new(book))
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod factory_tests;
