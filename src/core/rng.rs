//! Deterministic random number generation for rollouts.
//!
//! The engine owns a single `SearchRng`, reseeded at the start of every
//! `search()` call: from a fixed seed when the configuration provides one
//! (repeated searches on identical input are then bit-identical), or from
//! OS entropy otherwise. No process-global RNG state is touched.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG used by the simulation phase.
///
/// Uses ChaCha8 for speed while keeping a deterministic, seedable stream.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
}

impl SearchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose an index with probability proportional to its integer weight.
    ///
    /// Weights need not be normalized. Returns `None` if the weights are
    /// empty or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[i32]) -> Option<usize> {
        let total: i32 = weights.iter().sum();
        if total <= 0 {
            return None;
        }

        let mut threshold = self.inner.gen_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            threshold -= weight;
            if threshold < 0 {
                return Some(i);
            }
        }

        // Unreachable for positive totals, but keep the last index as a
        // floor rather than panicking.
        Some(weights.len() - 1)
    }
}
