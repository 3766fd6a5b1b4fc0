//! Fixed-size transposition table.
//!
//! One slot per `hash % capacity`, no chaining. A slot is replaced when it is
//! empty, when the same position is stored at least as deep, or when another
//! position is stored whose entry is from an older search or shallower by
//! more than two plies.

use std::mem;

use othello_core::Move;

/// How a stored score relates to the true score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The true score is at least the stored one (fail high).
    Lower,
    /// The true score is at most the stored one (fail low).
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub key: u64,
    pub score: i32,
    pub best_move: Move,
    pub depth: u8,
    pub bound: Bound,
    pub age: u8,
}

/// Outcome of a lookup. `score` is set only when it can be returned as is;
/// `best_move` is set whenever the position was found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Probe {
    pub score: Option<i32>,
    pub best_move: Option<Move>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TtStats {
    pub hits: u64,
    pub misses: u64,
    /// Lookups that found a different position in the slot.
    pub collisions: u64,
    pub stores: u64,
}

impl TtStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

pub const DEFAULT_TT_SIZE_MB: usize = 64;
const OCCUPANCY_SAMPLES: usize = 1000;

pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    age: u8,
    stats: TtStats,
}

impl TranspositionTable {
    /// Table using about `size_mb` MiB, with at least one slot.
    pub fn new(size_mb: usize) -> Self {
        let slot = mem::size_of::<Option<TtEntry>>();
        let capacity = (size_mb.saturating_mul(1024 * 1024) / slot).max(1);
        Self::with_capacity(capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            age: 1,
            stats: TtStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Look up `hash` for a search of `depth` plies in the (alpha, beta)
    /// window.
    pub fn probe(&mut self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Probe {
        let entry = match self.entries[self.index(hash)] {
            Some(entry) if entry.key == hash => entry,
            Some(_) => {
                self.stats.collisions += 1;
                self.stats.misses += 1;
                return Probe::default();
            }
            None => {
                self.stats.misses += 1;
                return Probe::default();
            }
        };
        self.stats.hits += 1;

        let best_move = Some(entry.best_move).filter(|mv| !mv.is_none());
        if entry.depth < depth {
            return Probe {
                score: None,
                best_move,
            };
        }
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.score >= beta,
            Bound::Upper => entry.score <= alpha,
        };
        Probe {
            score: usable.then_some(entry.score),
            best_move,
        }
    }

    pub fn store(&mut self, hash: u64, score: i32, best_move: Move, depth: u8, bound: Bound) {
        let idx = self.index(hash);
        let replace = match self.entries[idx] {
            None => true,
            Some(old) if old.key == hash => depth >= old.depth,
            Some(old) => old.age != self.age || depth > old.depth.saturating_add(2),
        };
        if replace {
            self.entries[idx] = Some(TtEntry {
                key: hash,
                score,
                best_move,
                depth,
                bound,
                age: self.age,
            });
            self.stats.stores += 1;
        }
    }

    /// Stored best move for `hash`, without touching statistics.
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.entries[self.index(hash)]
            .filter(|e| e.key == hash && !e.best_move.is_none())
            .map(|e| e.best_move)
    }

    /// Start a new search generation. Entries from older generations become
    /// replaceable. Generation 0 is skipped on wrap-around.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
        if self.age == 0 {
            self.age = 1;
        }
        self.stats = TtStats::default();
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.age = 1;
        self.stats = TtStats::default();
    }

    pub fn stats(&self) -> TtStats {
        self.stats
    }

    /// Share of occupied slots, estimated from up to 1000 evenly spaced ones.
    pub fn occupancy(&self) -> f64 {
        let samples = self.entries.len().min(OCCUPANCY_SAMPLES);
        let step = self.entries.len() / samples;
        let used = (0..samples)
            .filter(|i| self.entries[i * step].is_some())
            .count();
        used as f64 / samples as f64
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_SIZE_MB)
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
