//! Monte-Carlo Tree Search (UCT) for the gravity-drop board.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a fixed-capacity `NodePool` addressed
//!   by `NodeId` handles; retired subtrees recycle lazily.
//! - **Pruned expansion**: candidate actions are pre-classified so forced
//!   wins and must-answer threats crowd out neutral columns.
//! - **Weighted rollouts**: playouts draw columns in proportion to a
//!   positional score of the landing cell for both sides.
//! - **Root reuse**: the subtree under the actual line of play survives
//!   from turn to turn inside the shared arena.
//!
//! ## Usage
//!
//! ```rust
//! use drop_four::{Player, UctConfig, UctSearch};
//!
//! let config = UctConfig::default().with_max_iterations(1000).with_seed(42);
//! let mut engine = UctSearch::new(config);
//!
//! // Empty 6x7 board, no blocked cell, player 1 to move.
//! engine.initialize(6, 7, None, None, &[0; 42], Player::One);
//! let column = engine.search();
//! assert!(column < 7);
//! ```

pub mod arena;
pub mod config;
pub mod node;
pub mod search;
pub mod stats;

pub use arena::NodePool;
pub use config::UctConfig;
pub use node::{Node, NodeId};
pub use search::UctSearch;
pub use stats::SearchStats;
