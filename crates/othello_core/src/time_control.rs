//! Search budgets: depth, wall-clock time and node count.
//!
//! Budgets are cooperative. Searches call [`SearchLimits::poll`] at every
//! node and the clock and node budget are only consulted every
//! `check_interval` nodes, so a search can overrun by at most one interval.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Nodes between two budget checks.
pub const CHECK_INTERVAL: u64 = 1024;

/// Limits for a single move decision.
///
/// A search stops at whichever of depth, time and node budget runs out first,
/// and must then return the best move it has.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum time for this move (None = no limit)
    pub move_time: Option<Duration>,
    /// Maximum nodes for this move (None = no limit)
    pub node_limit: Option<u64>,
    /// Time controller for checking if search should stop
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Depth limit only.
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            node_limit: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            node_limit: None,
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Time limit only (unbounded depth).
    pub fn time(move_time: Duration) -> Self {
        Self::depth_and_time(u8::MAX, move_time)
    }

    /// Node limit only (unbounded depth).
    pub fn nodes(node_limit: u64) -> Self {
        Self::depth(u8::MAX).with_node_limit(node_limit)
    }

    /// Adds a node budget, keeping the tighter one if already set.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(self.node_limit.map_or(node_limit, |n| n.min(node_limit)));
        self
    }

    /// Caps the depth, keeping the tighter one.
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.depth = self.depth.min(depth);
        self
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }

    /// Whether the search must stop, given `nodes` searched so far.
    ///
    /// Reads the stop flag on every call; the node budget and the clock are
    /// checked every `CHECK_INTERVAL` nodes and latch the flag when spent.
    #[inline]
    pub fn poll(&self, nodes: u64) -> bool {
        if !self.time_control.should_check_time(nodes) {
            return self.time_control.is_stopped();
        }
        if let Some(limit) = self.node_limit
            && nodes >= limit
        {
            self.time_control.stop();
            return true;
        }
        self.time_control.check_time()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe time controller that tracks whether search should stop.
///
/// Clones share the stop flag, so another thread can cancel a running search
/// by calling [`TimeControl::stop`] on its clone.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            time_limit,
            check_interval: CHECK_INTERVAL,
        }
    }

    /// Start the clock. Should be called when search begins.
    pub fn start(&self) {
        if let Ok(mut start) = self.start_time.write() {
            *start = Some(Instant::now());
        }
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check the clock and latch the stop flag if time expired.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    /// Elapsed time since `start`, zero before it.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .ok()
            .and_then(|start| start.map(|s| s.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
