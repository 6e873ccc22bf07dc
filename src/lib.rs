//! # drop-four
//!
//! A real-time move-selection engine for two-player, gravity-drop
//! connection games on rectangular grids: hand it the current board and a
//! time/iteration budget, get back the column to play.
//!
//! ## Design
//!
//! - **Bit-plane board**: occupancy packed into per-row/column/diagonal
//!   plane words, giving O(1) place/remove/win-check and an O(board-size)
//!   snapshot restore between search iterations.
//!
//! - **Arena-allocated tree**: a fixed-capacity slab plus recycling queue
//!   allocates search nodes without per-node heap traffic and lets the
//!   tree under the actual line of play survive across turns.
//!
//! - **UCT with pruning**: UCB1 selection, forced-win/must-answer action
//!   classification at expansion, and positionally weighted playouts.
//!
//! The engine is single-threaded and statistical best-effort — it is not
//! a solver.
//!
//! ## Modules
//!
//! - `core`: players, outcomes, the seedable search RNG
//! - `board`: bit-plane board encoding and the positional scorer
//! - `mcts`: arena, node, configuration, statistics, and the search loop

pub mod board;
pub mod core;
pub mod mcts;

pub use crate::board::{BitBoard, MAX_SIZE};
pub use crate::core::{Outcome, Player, SearchRng};
pub use crate::mcts::{Node, NodeId, NodePool, SearchStats, UctConfig, UctSearch};
