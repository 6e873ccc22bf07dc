//! Core engine types: players, outcomes, RNG.

pub mod player;
pub mod rng;

pub use player::{Outcome, Player};
pub use rng::SearchRng;
