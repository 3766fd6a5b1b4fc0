//! Error types for the fallible entry points of the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read an opening book stream or file.
///
/// Only whole-stream problems are errors; a bad game inside an otherwise
/// readable stream is skipped and counted in the load report instead.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read book data: {0}")]
    Io(#[from] io::Error),

    #[error("book header truncated: got {len} of 16 bytes")]
    TruncatedHeader { len: usize },

    #[error("failed to open book file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to parse a board diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 64 cells, found {0}")]
    WrongCellCount(usize),

    #[error("unexpected character {0:?} in board diagram")]
    BadCell(char),

    #[error("unknown side to move {0:?}")]
    BadSide(String),

    #[error("black and white discs overlap on {0} squares")]
    Overlap(u32),
}

/// Failure to load an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("book.randomness must be between 0 and 1, got {0}")]
    BookRandomness(f64),
}
