//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `search()` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Completed iterations.
    pub iterations: u32,

    /// Nodes expanded (added to the tree).
    pub nodes_expanded: u32,

    /// Playouts run to a terminal outcome.
    pub simulations: u32,

    /// Whether the previous turn's subtree was promoted to the new root.
    pub root_reused: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-search counters, keeping the root-reuse flag set by
    /// the preceding `initialize()`.
    pub fn reset(&mut self) {
        let root_reused = self.root_reused;
        *self = Self::default();
        self.root_reused = root_reused;
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
