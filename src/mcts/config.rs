//! Search configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// UCT search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UctConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Maximum iterations per `search()` call.
    pub max_iterations: u32,

    /// Node budget for the arena. The pool spans the engine's lifetime,
    /// so this also caps total tree size across reused turns.
    pub max_nodes: usize,

    /// Wall-clock budget per `search()` call, checked every 1000
    /// iterations; a search never aborts mid-iteration.
    pub time_limit: Duration,

    /// Seed for the simulation RNG, applied at the start of every
    /// `search()` call. `None` draws a fresh entropy seed per call;
    /// `Some` makes repeated searches on identical input deterministic.
    pub seed: Option<u64>,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 400_000,
            max_nodes: 400_000,
            time_limit: Duration::from_millis(2500),
            seed: None,
        }
    }
}

impl UctConfig {
    /// Create a new config with a custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Create a new config with a custom node budget.
    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Create a new config with a custom wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Create a new config with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UctConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.max_iterations, 400_000);
        assert_eq!(config.max_nodes, 400_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = UctConfig::default()
            .with_exploration(0.8)
            .with_seed(123)
            .with_max_iterations(5000)
            .with_time_limit(Duration::from_millis(100));

        assert_eq!(config.exploration_constant, 0.8);
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.time_limit, Duration::from_millis(100));
    }

    #[test]
    fn test_serialization() {
        let config = UctConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UctConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.seed, Some(7));
        assert_eq!(deserialized.max_nodes, config.max_nodes);
    }
}
