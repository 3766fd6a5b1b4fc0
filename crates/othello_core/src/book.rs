//! Opening book built from WThor-style game databases.
//!
//! A database file is a 16-byte header followed by fixed 68-byte game
//! records. The header stores the number of games as a little-endian `u32`
//! at bytes 4..8. In each record, byte 7 is black's final disc count and
//! bytes 8..68 hold up to 60 move codes, ended early by a zero byte. A code
//! is `row * 10 + col + offset` with zero-based row and column.
//!
//! The book replays the first few moves of every game and aggregates, per
//! position hash, how often each move was played and how it turned out for
//! the player who made it. Books are rebuilt from the game files at every
//! load and never persisted, so they always match the current hash keys.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::BookError;
use crate::types::{Move, Side};

pub const HEADER_SIZE: usize = 16;
pub const GAME_RECORD_SIZE: usize = 68;
pub const MOVES_OFFSET: usize = 8;
pub const BLACK_SCORE_OFFSET: usize = 7;

/// Opening plies replayed per game.
pub const BOOK_MAX_DEPTH: usize = 12;
pub const MIN_BOOK_GAMES: u32 = 2;
pub const SECOND_CHOICE_PROBABILITY: f64 = 0.15;
/// Game count at which the popularity part of a move's score saturates.
pub const POPULARITY_CEILING: u32 = 100;

const WIN_RATE_WEIGHT: f64 = 0.8;
const POPULARITY_WEIGHT: f64 = 0.2;

/// Tunables for building and querying a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Plies replayed per game; queries past this are refused.
    pub max_depth: usize,
    /// Moves seen in fewer games are ignored.
    pub min_games: u32,
    /// Chance of answering with the second-best move.
    pub randomness: f64,
    /// Added to `row * 10 + col` in move codes. Standard WThor files use 11.
    pub code_offset: u8,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_depth: BOOK_MAX_DEPTH,
            min_games: MIN_BOOK_GAMES,
            randomness: SECOND_CHOICE_PROBABILITY,
            code_offset: 10,
        }
    }
}

/// Aggregated results for one move from one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub mv: Move,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl BookMove {
    fn new(mv: Move) -> Self {
        Self {
            mv,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    /// Share of points for the mover, draws counting half.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / self.games as f64
    }

    /// Ranking score: mostly results, partly popularity.
    pub fn score(&self) -> f64 {
        let popularity = (self.games as f64 / POPULARITY_CEILING as f64).min(1.0);
        WIN_RATE_WEIGHT * self.win_rate() + POPULARITY_WEIGHT * popularity
    }
}

/// All recorded moves from one position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPosition {
    pub total_games: u32,
    pub moves: Vec<BookMove>,
}

impl BookPosition {
    fn record(&mut self, mv: Move, outcome: Ordering) {
        self.total_games += 1;
        let idx = match self.moves.iter().position(|m| m.mv == mv) {
            Some(idx) => idx,
            None => {
                self.moves.push(BookMove::new(mv));
                self.moves.len() - 1
            }
        };
        let entry = &mut self.moves[idx];
        entry.games += 1;
        match outcome {
            Ordering::Greater => entry.wins += 1,
            Ordering::Equal => entry.draws += 1,
            Ordering::Less => entry.losses += 1,
        }
    }
}

/// What one stream contributed to the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookLoadReport {
    /// Game count claimed by the header.
    pub declared: u32,
    /// Games whose opening was added.
    pub loaded: u32,
    /// Complete records rejected as malformed.
    pub skipped: u32,
    /// The stream ended inside a record or before the declared count.
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    pub games: u64,
    pub positions: usize,
    pub max_depth: usize,
}

/// Read-only after loading; share it between engines with an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    positions: HashMap<u64, BookPosition>,
    config: BookConfig,
    games: u64,
    deepest_ply: usize,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            positions: HashMap::new(),
            config,
            games: 0,
            deepest_ply: 0,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Ingest every game of one database stream.
    ///
    /// A short header is an error. A stream that ends early keeps the games
    /// read so far; malformed records are skipped. Both are reported.
    pub fn load_reader<R: Read>(&mut self, mut reader: R) -> Result<BookLoadReport, BookError> {
        let mut header = [0u8; HEADER_SIZE];
        let len = read_full(&mut reader, &mut header)?;
        if len < HEADER_SIZE {
            return Err(BookError::TruncatedHeader { len });
        }

        let declared = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let mut report = BookLoadReport {
            declared,
            ..Default::default()
        };

        let mut record = [0u8; GAME_RECORD_SIZE];
        for index in 0..declared {
            let len = read_full(&mut reader, &mut record)?;
            if len < GAME_RECORD_SIZE {
                report.truncated = true;
                warn!(
                    index,
                    declared,
                    bytes = len,
                    "book stream ended early, keeping complete games"
                );
                break;
            }
            match self.add_game(&record) {
                Ok(()) => report.loaded += 1,
                Err(reason) => {
                    report.skipped += 1;
                    debug!(index, reason, "skipping book game");
                }
            }
        }
        Ok(report)
    }

    /// Ingest one database file.
    pub fn load_file(&mut self, path: &Path) -> Result<BookLoadReport, BookError> {
        let file = File::open(path).map_err(|source| BookError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.load_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            truncated = report.truncated,
            "loaded book file"
        );
        Ok(report)
    }

    /// Ingest a database file, or every `*.wtb` file of a directory in name
    /// order. Unreadable files are logged and skipped.
    ///
    /// Returns the number of games added.
    pub fn load_path(&mut self, path: &Path) -> u64 {
        let files = if path.is_dir() {
            match database_files(path) {
                Ok(files) => files,
                Err(err) => {
                    warn!(path = %path.display(), %err, "cannot list book directory");
                    return 0;
                }
            }
        } else {
            vec![path.to_path_buf()]
        };

        let mut loaded = 0u64;
        for file in &files {
            match self.load_file(file) {
                Ok(report) => loaded += report.loaded as u64,
                Err(err) => warn!(path = %file.display(), %err, "skipping book file"),
            }
        }
        let stats = self.stats();
        info!(
            files = files.len(),
            games = stats.games,
            positions = stats.positions,
            "opening book ready"
        );
        loaded
    }

    fn add_game(&mut self, record: &[u8; GAME_RECORD_SIZE]) -> Result<(), &'static str> {
        let black_discs = record[BLACK_SCORE_OFFSET];
        if black_discs > 64 {
            return Err("black score above 64");
        }
        let black_result = black_discs.cmp(&32);

        let mut board = Board::startpos();
        let mut plies = 0usize;
        for &code in record[MOVES_OFFSET..].iter().take(self.config.max_depth) {
            if code == 0 {
                break;
            }
            let Some(sq) = decode_move(code, self.config.code_offset) else {
                break;
            };
            // Records leave passes implicit.
            if board.must_pass() {
                board.pass();
            }
            let flipped = board.flips(sq);
            if flipped.is_empty() {
                break;
            }

            let mover_result = match board.side_to_move {
                Side::Black => black_result,
                Side::White => black_result.reverse(),
            };
            self.positions
                .entry(board.hash())
                .or_default()
                .record(Move::new(sq), mover_result);
            board.make_move_with_flips(sq, flipped);
            plies += 1;
        }

        if plies == 0 {
            return Err("no playable moves");
        }
        self.games += 1;
        self.deepest_ply = self.deepest_ply.max(plies);
        Ok(())
    }

    /// Recorded moves for `board` in insertion order.
    pub fn moves(&self, board: &Board) -> &[BookMove] {
        self.positions
            .get(&board.hash())
            .map(|p| p.moves.as_slice())
            .unwrap_or(&[])
    }

    /// Qualifying moves for `board`, best first.
    pub fn ranked_moves(&self, board: &Board) -> Vec<BookMove> {
        let mut moves: Vec<BookMove> = self
            .moves(board)
            .iter()
            .filter(|m| m.games >= self.config.min_games)
            .copied()
            .collect();
        moves.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then(b.games.cmp(&a.games))
                .then(a.mv.to_u8().cmp(&b.mv.to_u8()))
        });
        moves
    }

    /// Book move for `board`, where `ply` is the number of moves played so
    /// far. Usually the best-ranked move; sometimes the runner-up.
    pub fn probe<R: Rng + ?Sized>(&self, board: &Board, ply: usize, rng: &mut R) -> Option<Move> {
        if ply >= self.config.max_depth {
            return None;
        }
        let ranked = self.ranked_moves(board);
        let pick = match ranked.as_slice() {
            [] => return None,
            [only] => only,
            [best, second, ..] => {
                if rng.gen_bool(self.second_choice_probability()) {
                    second
                } else {
                    best
                }
            }
        };
        Some(pick.mv)
    }

    /// `randomness` clamped to a probability; NaN means never.
    fn second_choice_probability(&self) -> f64 {
        let p = self.config.randomness;
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.positions.contains_key(&board.hash())
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.games = 0;
        self.deepest_ply = 0;
    }

    pub fn stats(&self) -> BookStats {
        BookStats {
            games: self.games,
            positions: self.positions.len(),
            max_depth: self.deepest_ply,
        }
    }
}

/// Square for a move code, if it lies on the board.
pub fn decode_move(code: u8, offset: u8) -> Option<u8> {
    let value = code.checked_sub(offset)?;
    let (row, col) = (value / 10, value % 10);
    if row < 8 && col < 8 {
        Some(row * 8 + col)
    } else {
        None
    }
}

/// Fill `buf` from `reader`, returning fewer bytes only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

fn database_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_database = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wtb"));
        if path.is_file() && is_database {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
