//! UCT search loop and the engine boundary.
//!
//! Each iteration runs SELECT -> EXPAND -> SIMULATE -> BACKPROPAGATE and
//! then restores the board to the turn snapshot. The loop stops on the
//! iteration budget or, checked every 1000 iterations, the wall-clock
//! budget; a search never aborts mid-iteration.
//!
//! The tree persists between turns inside the shared arena: `initialize`
//! tries to promote the grandchild reached by the engine's own last move
//! and the opponent's reply, keeping its accumulated statistics, and only
//! rebuilds from scratch when that branch was pruned away.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::board::{BitBoard, MAX_SIZE};
use crate::core::{Outcome, Player, SearchRng};

use super::arena::NodePool;
use super::config::UctConfig;
use super::node::NodeId;
use super::stats::SearchStats;

/// Iterations between wall-clock checks.
const TIME_CHECK_INTERVAL: u32 = 1000;

/// Move-selection engine: board, search tree, and arena in one unit.
///
/// `&mut self` on every operation makes the single-search-at-a-time
/// contract structural; there is no internal synchronization.
pub struct UctSearch {
    board: BitBoard,
    pool: NodePool,
    rng: SearchRng,
    config: UctConfig,
    stats: SearchStats,
    root: NodeId,
    player: Player,
    winner: Option<Outcome>,
    last_act: Option<usize>,
}

impl UctSearch {
    /// Create an engine with an arena sized to the configured node budget.
    #[must_use]
    pub fn new(config: UctConfig) -> Self {
        let pool = NodePool::with_capacity(config.max_nodes);
        Self {
            board: BitBoard::new(),
            pool,
            rng: SearchRng::from_entropy(),
            config,
            stats: SearchStats::default(),
            root: NodeId::NONE,
            player: Player::One,
            winner: None,
            last_act: None,
        }
    }

    /// Load a turn snapshot: a dense row-major grid (0 = empty, 1/2 =
    /// player id), the optional blocked cell, and the opponent's reply
    /// column. Builds a fresh root for a new game (or when no previous
    /// tree exists) and otherwise reuses the previous tree via root
    /// promotion.
    pub fn initialize(
        &mut self,
        rows: usize,
        cols: usize,
        blocked: Option<(usize, usize)>,
        last_opponent_col: Option<usize>,
        grid: &[u8],
        player: Player,
    ) {
        self.board.init(rows, cols, blocked, grid);
        self.winner = None;
        self.player = player;
        self.stats.root_reused = false;

        let stones = grid.iter().filter(|&&cell| cell != 0).count();
        if stones < 2 || self.root.is_none() {
            self.rebuild_root();
        } else {
            self.move_root(last_opponent_col);
        }
    }

    /// Run the bounded search and return the column to play. The chosen
    /// column is remembered as this engine's last move for the next
    /// turn's root-reuse lookup.
    ///
    /// Must be preceded by `initialize`.
    pub fn search(&mut self) -> usize {
        let start = Instant::now();
        self.rng = match self.config.seed {
            Some(seed) => SearchRng::new(seed),
            None => SearchRng::from_entropy(),
        };
        self.stats.reset();

        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            if iterations % TIME_CHECK_INTERVAL == 0
                && start.elapsed() > self.config.time_limit
            {
                break;
            }

            let leaf = self.tree_policy();
            let perspective = self.pool.get(leaf).player;
            let reward = self.rollout(perspective);
            self.backup(leaf, reward);

            self.board.reinit();
            self.winner = None;
            iterations += 1;
        }

        self.stats.iterations = iterations;
        self.stats.time_us = start.elapsed().as_micros() as u64;

        if tracing::enabled!(tracing::Level::TRACE) {
            let root = self.pool.get(self.root);
            for &child in &root.children {
                let node = self.pool.get(child);
                trace!(
                    action = ?node.action,
                    visits = node.visits,
                    mean = node.reward / f64::from(node.visits.max(1)),
                    "root child"
                );
            }
        }

        let action = match self.final_action() {
            Some(col) => col,
            None => self.first_open_column(),
        };
        self.last_act = Some(action);

        debug!(
            iterations = self.stats.iterations,
            nodes_expanded = self.stats.nodes_expanded,
            time_us = self.stats.time_us,
            action,
            "search complete"
        );
        action
    }

    /// Statistics from the most recent `search()` call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    /// The board as of the last `initialize`/`search` (mainly for its
    /// `Display` rendering).
    #[must_use]
    pub fn board(&self) -> &BitBoard {
        &self.board
    }

    /// Arena high-water mark.
    #[must_use]
    pub fn tree_size(&self) -> usize {
        self.pool.len()
    }

    // === SELECT ===

    /// Descend from the root, replaying moves on the board, until a node
    /// with untried actions (expandable while the pool has room), a true
    /// leaf, or a finished game.
    fn tree_policy(&mut self) -> NodeId {
        let mut v = self.root;
        while self.winner.is_none() {
            if !self.pool.get(v).untried.is_empty() && self.pool.unfull() {
                return self.expand(v);
            }
            if self.pool.get(v).children.is_empty() {
                break;
            }
            let child = self.best_child(v);
            let (action, player) = {
                let node = self.pool.get(child);
                (node.action, node.player)
            };
            if let Some(col) = action {
                self.apply_move(col, player);
            }
            v = child;
        }
        v
    }

    /// Child maximizing UCB1; ties resolve to the first-seen maximum.
    fn best_child(&self, v: NodeId) -> NodeId {
        let node = self.pool.get(v);
        let ln_parent = (node.visits.max(1) as f64).ln();
        let exploration = self.config.exploration_constant;

        let mut best = NodeId::NONE;
        let mut best_score = f64::NEG_INFINITY;
        for &child in &node.children {
            let score = self.pool.get(child).ucb(exploration, ln_parent);
            if best.is_none() || score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    // === EXPAND ===

    /// Pop one untried action, allocate its child, play the move, and
    /// classify the child's own candidates unless the move ended the game.
    fn expand(&mut self, v: NodeId) -> NodeId {
        let col = match self.pool.get_mut(v).untried.pop() {
            Some(col) => col,
            None => return v,
        };
        let mover = self.pool.get(v).player.opponent();

        let child = self.pool.alloc(v, mover, Some(col));
        self.pool.get_mut(v).children.push(child);
        self.apply_move(col, mover);
        if self.winner.is_none() {
            self.classify_actions(child);
        }
        self.stats.nodes_expanded += 1;
        child
    }

    /// Classify candidate actions for the player to move at `v`.
    ///
    /// Per non-full column, in priority order: an immediately winning
    /// column becomes the sole candidate; otherwise columns where the
    /// opponent would complete four are must-answer candidates that
    /// suppress all neutral columns; otherwise the column is neutral.
    /// Heuristic pruning, not exhaustive proof.
    fn classify_actions(&mut self, v: NodeId) {
        let owner = self.pool.get(v).player;
        let mover = owner.opponent();

        let mut candidates: SmallVec<[usize; MAX_SIZE]> = SmallVec::new();
        let mut must_answer = false;
        for col in 0..self.board.cols() {
            if self.board.is_full(col) {
                continue;
            }

            self.board.place(col, mover);
            let wins = self.board.judge_win(col);
            self.board.remove(col, mover);
            if wins {
                candidates.clear();
                candidates.push(col);
                break;
            }

            self.board.place(col, owner);
            let loses = self.board.judge_win(col);
            self.board.remove(col, owner);
            if loses {
                if !must_answer {
                    candidates.clear();
                    must_answer = true;
                }
                candidates.push(col);
                continue;
            }

            if !must_answer {
                candidates.push(col);
            }
        }

        let untried = &mut self.pool.get_mut(v).untried;
        untried.clear();
        untried.extend(candidates);
    }

    // === SIMULATE ===

    /// Weighted random playout to a terminal outcome.
    ///
    /// Legal columns are drawn with probability proportional to the
    /// positional value of their landing cell for both sides combined.
    /// Returns +1 if `perspective` wins, -1 if the opponent does, 0 on a
    /// tie.
    fn rollout(&mut self, perspective: Player) -> f64 {
        let mut mover = perspective.opponent();
        let mut feasible: SmallVec<[usize; MAX_SIZE]> = (0..self.board.cols())
            .filter(|&col| !self.board.is_full(col))
            .collect();
        let mut scores: SmallVec<[i32; MAX_SIZE]> = SmallVec::new();

        while self.winner.is_none() {
            scores.clear();
            for &col in &feasible {
                let row = self.board.top(col) - 1;
                scores.push(
                    self.board.value_judge(row, col, mover)
                        + self.board.value_judge(row, col, mover.opponent()),
                );
            }

            let choice = match self.rng.choose_weighted(&scores) {
                Some(choice) => choice,
                None => break,
            };
            let col = feasible[choice];
            self.apply_move(col, mover);
            if self.board.is_full(col) {
                feasible.remove(choice);
            }
            mover = mover.opponent();
        }

        self.stats.simulations += 1;
        match self.winner {
            Some(Outcome::Win(winner)) if winner == perspective => 1.0,
            Some(Outcome::Win(_)) => -1.0,
            _ => 0.0,
        }
    }

    // === BACKPROPAGATE ===

    /// Walk from `v` to the root inclusive, flipping the reward's sign at
    /// each step up.
    fn backup(&mut self, v: NodeId, reward: f64) {
        let mut v = v;
        let mut reward = reward;
        while !v.is_none() {
            let node = self.pool.get_mut(v);
            node.visits += 1;
            node.reward += reward;
            v = node.parent;
            reward = -reward;
        }
    }

    // === DECISION / ROOT MANAGEMENT ===

    /// Action of the most-visited root child; ties resolve to the
    /// first-seen maximum. `None` when the root has no children.
    fn final_action(&self) -> Option<usize> {
        let root = self.pool.get(self.root);
        let mut best = None;
        let mut best_visits = 0;
        for &child in &root.children {
            let node = self.pool.get(child);
            if best.is_none() || node.visits > best_visits {
                best_visits = node.visits;
                best = node.action;
            }
        }
        best
    }

    fn first_open_column(&self) -> usize {
        (0..self.board.cols())
            .find(|&col| !self.board.is_full(col))
            .unwrap_or(0)
    }

    /// Discard any existing tree and build a fresh, classified root.
    fn rebuild_root(&mut self) {
        if !self.root.is_none() {
            self.pool.retire(self.root);
        }
        let root = self.pool.alloc(NodeId::NONE, self.player.opponent(), None);
        self.root = root;
        self.classify_actions(root);
    }

    /// Promote the grandchild reached by the engine's own last move and
    /// the opponent's reply. Each promoted child is detached before its
    /// old parent is retired, so the abandoned siblings recycle lazily.
    /// Any lookup failure discards the tree and rebuilds.
    fn move_root(&mut self, last_opponent_col: Option<usize>) {
        for step in [self.last_act, last_opponent_col] {
            let col = match step {
                Some(col) => col,
                None => {
                    trace!("root reuse aborted: missing move history");
                    self.rebuild_root();
                    return;
                }
            };

            let children = self.pool.get(self.root).children.clone();
            let matched = children
                .iter()
                .copied()
                .find(|&child| self.pool.get(child).action == Some(col));
            match matched {
                Some(child) => {
                    let old = self.root;
                    let node = self.pool.get_mut(old);
                    if let Some(pos) = node.children.iter().position(|&c| c == child) {
                        node.children.remove(pos);
                    }
                    self.pool.get_mut(child).parent = NodeId::NONE;
                    self.root = child;
                    self.pool.retire(old);
                }
                None => {
                    trace!(col, "root reuse failed: branch was pruned away");
                    self.rebuild_root();
                    return;
                }
            }
        }
        self.stats.root_reused = true;
        trace!("root reused across turns");
    }

    /// Play a move and record a win or tie if it ended the game.
    fn apply_move(&mut self, col: usize, player: Player) {
        self.board.place(col, player);
        if self.board.judge_win(col) {
            self.winner = Some(Outcome::Win(player));
        } else if self.board.is_tie() {
            self.winner = Some(Outcome::Tie);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> UctSearch {
        UctSearch::new(UctConfig::default().with_seed(42))
    }

    fn grid_6x7(rows: &[(usize, usize, u8)]) -> [u8; 42] {
        let mut grid = [0u8; 42];
        for &(row, col, id) in rows {
            grid[row * 7 + col] = id;
        }
        grid
    }

    #[test]
    fn test_classification_neutral_keeps_all_columns() {
        let mut search = engine();
        search.initialize(6, 7, None, None, &[0; 42], Player::One);

        let untried = &search.pool.get(search.root).untried;
        assert_eq!(untried.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_classification_immediate_win_is_sole_candidate() {
        // Player One to move with three in a row on the bottom.
        let grid = grid_6x7(&[
            (5, 0, 1),
            (5, 1, 1),
            (5, 2, 1),
            (4, 0, 2),
            (4, 1, 2),
        ]);
        let mut search = engine();
        search.initialize(6, 7, None, None, &grid, Player::One);

        let untried = &search.pool.get(search.root).untried;
        assert_eq!(untried.as_slice(), &[3]);
    }

    #[test]
    fn test_classification_forced_answer_suppresses_neutrals() {
        // Player One to move; Player Two completes four at column 3.
        let grid = grid_6x7(&[
            (5, 0, 2),
            (5, 1, 2),
            (5, 2, 2),
            (4, 0, 1),
            (4, 1, 1),
        ]);
        let mut search = engine();
        search.initialize(6, 7, None, None, &grid, Player::One);

        let untried = &search.pool.get(search.root).untried;
        assert_eq!(untried.as_slice(), &[3]);
    }

    #[test]
    fn test_classification_keeps_every_forced_answer() {
        // Open-ended three for Player Two: both flanks must be answered.
        let grid = grid_6x7(&[
            (5, 2, 2),
            (5, 3, 2),
            (5, 4, 2),
            (4, 2, 1),
            (4, 3, 1),
        ]);
        let mut search = engine();
        search.initialize(6, 7, None, None, &grid, Player::One);

        let untried = &search.pool.get(search.root).untried;
        assert_eq!(untried.as_slice(), &[1, 5]);
    }

    #[test]
    fn test_final_action_prefers_first_seen_maximum() {
        let mut search = engine();
        search.initialize(6, 7, None, None, &[0; 42], Player::One);

        let root = search.root;
        for (action, visits) in [(0, 5), (1, 9), (2, 9), (3, 2)] {
            let child = search.pool.alloc(root, Player::One, Some(action));
            search.pool.get_mut(child).visits = visits;
            search.pool.get_mut(root).children.push(child);
        }

        assert_eq!(search.final_action(), Some(1));
    }

    #[test]
    fn test_final_action_empty_root() {
        let mut search = engine();
        search.initialize(6, 7, None, None, &[0; 42], Player::One);
        assert_eq!(search.final_action(), None);
    }

    #[test]
    fn test_backup_alternates_perspective() {
        let mut search = engine();
        search.initialize(6, 7, None, None, &[0; 42], Player::One);

        let root = search.root;
        let child = search.pool.alloc(root, Player::One, Some(3));
        search.pool.get_mut(root).children.push(child);

        search.backup(child, 1.0);

        assert_eq!(search.pool.get(child).visits, 1);
        assert_eq!(search.pool.get(child).reward, 1.0);
        assert_eq!(search.pool.get(root).visits, 1);
        assert_eq!(search.pool.get(root).reward, -1.0);
    }

    #[test]
    fn test_apply_move_records_win() {
        let mut search = engine();
        search.initialize(6, 7, None, None, &[0; 42], Player::One);

        for col in 0..3 {
            search.apply_move(col, Player::One);
            assert_eq!(search.winner, None);
        }
        search.apply_move(3, Player::One);
        assert_eq!(search.winner, Some(Outcome::Win(Player::One)));
    }

    #[test]
    fn test_apply_move_records_tie() {
        let mut search = engine();
        search.initialize(2, 2, None, None, &[0; 4], Player::One);

        search.apply_move(0, Player::One);
        search.apply_move(0, Player::Two);
        search.apply_move(1, Player::Two);
        assert_eq!(search.winner, None);
        search.apply_move(1, Player::One);
        assert_eq!(search.winner, Some(Outcome::Tie));
    }
}
