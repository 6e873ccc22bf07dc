//! Search-tree node and its arena handle.
//!
//! Nodes live in the `NodePool` arena and reference each other by `NodeId`
//! index. Parent and child handles are traversal aids for backpropagation
//! and root promotion, not ownership: a node is destroyed only by
//! retirement back to the pool.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::MAX_SIZE;
use crate::core::Player;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// One search-tree vertex.
///
/// The child and untried-action lists are capacity-bounded at `MAX_SIZE`
/// (one slot per column); the bound is what keeps node size, and with it
/// the arena budget, fixed.
#[derive(Clone, Debug)]
pub struct Node {
    /// Parent handle (NONE for the root).
    pub parent: NodeId,

    /// The player whose move produced this node.
    pub player: Player,

    /// Column of that move (`None` for a freshly built root).
    pub action: Option<usize>,

    /// Visit count N.
    pub visits: u32,

    /// Accumulated reward Q, from this node's player's perspective.
    pub reward: f64,

    /// Expanded children.
    pub children: ArrayVec<NodeId, MAX_SIZE>,

    /// Candidate actions not yet expanded, pre-classified but not
    /// quality-ordered.
    pub untried: ArrayVec<usize, MAX_SIZE>,
}

impl Node {
    /// Create a fresh node.
    pub fn new(parent: NodeId, player: Player, action: Option<usize>) -> Self {
        Self {
            parent,
            player,
            action,
            visits: 0,
            reward: 0.0,
            children: ArrayVec::new(),
            untried: ArrayVec::new(),
        }
    }

    /// Reinitialize a recycled slot. Leaves no residue from the previous
    /// occupant.
    pub fn reset(&mut self, parent: NodeId, player: Player, action: Option<usize>) {
        self.parent = parent;
        self.player = player;
        self.action = action;
        self.visits = 0;
        self.reward = 0.0;
        self.children.clear();
        self.untried.clear();
    }

    /// UCB1 selection score: Q/N + C * sqrt(ln(parent visits) / N).
    ///
    /// Callers guarantee N >= 1 (a node is visited by the backpropagation
    /// of the iteration that created it).
    #[must_use]
    pub fn ucb(&self, exploration: f64, ln_parent_visits: f64) -> f64 {
        let n = self.visits as f64;
        self.reward / n + exploration * (ln_parent_visits / n).sqrt()
    }
}
