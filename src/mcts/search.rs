//! The search loop: selection, expansion, playout, backpropagation.
//!
//! Single-player rules throughout. Rewards accumulate without sign flips,
//! and the result of a run is the best terminal state witnessed anywhere
//! (during expansion or playout), not the most visited root child: in a
//! one-player domain the best outcome ever seen is reproducible and
//! strictly better than an aggregate vote.

use std::time::Instant;

use crate::core::{Error, Result, SearchRng};
use crate::state::CrosswordState;

use super::config::SearchConfig;
use super::node::{playout, ucb1, NodeId, SearchNode};
use super::stats::{IterationRecord, SearchStats};
use super::tree::{SearchTree, TreeStats};

/// Best terminal state witnessed so far. Strict improvement only, so the
/// earliest state wins ties.
#[derive(Debug)]
struct BestState {
    reward: f64,
    state: CrosswordState,
}

/// One search run over a crossword state space.
pub struct Search {
    config: SearchConfig,
    tree: SearchTree,
    rng: SearchRng,
    stats: SearchStats,
    best: Option<BestState>,
    history: Vec<IterationRecord>,
}

impl Search {
    /// Set up a search from an initial state.
    #[must_use]
    pub fn new(initial: CrosswordState, config: SearchConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        let root = SearchNode::root(initial);

        let mut search = Self {
            config,
            tree: SearchTree::new(root),
            rng,
            stats: SearchStats::new(),
            best: None,
            history: Vec::new(),
        };

        // A root that is already finished is its own best outcome.
        if search.tree.root_node().is_terminal {
            let state = search.tree.root_node().state.clone();
            search.offer_best(state);
        }
        search
    }

    /// Run one iteration.
    ///
    /// Returns `Ok(true)` if an iteration was executed and `Ok(false)` once
    /// the search is finished: budget spent, root exhausted, or a perfect
    /// fill witnessed with `stop_on_perfect` set. The orchestrator drives
    /// this per-iteration so cancellation stays at iteration boundaries; an
    /// iteration in progress always completes.
    pub fn step(&mut self) -> Result<bool> {
        if self.stats.iterations >= self.config.max_iterations {
            return Ok(false);
        }
        if self.tree.root_node().exhausted {
            return Ok(false);
        }
        if self.config.stop_on_perfect && self.best_reward() >= 1.0 {
            return Ok(false);
        }

        let start = Instant::now();

        let leaf = self.select();
        let node = if self.tree.get(leaf).is_terminal {
            leaf
        } else {
            self.expand(leaf)?
        };

        let terminal_state = if self.tree.get(node).is_terminal {
            self.tree.get(node).state.clone()
        } else {
            let mut sim_rng = self.rng.fork();
            playout(self.tree.get(node).state.clone(), &mut sim_rng)?
        };
        self.stats.simulations += 1;

        let value = terminal_state.reward();
        self.offer_best(terminal_state);
        self.backpropagate(node, value);

        self.stats.iterations += 1;
        let record = IterationRecord {
            iteration: self.stats.iterations,
            best_reward_so_far: self.best_reward(),
            entries_filled_in_best: self.best_state().filled_entries() as u32,
        };
        self.history.push(record);
        self.stats.time_us += start.elapsed().as_micros() as u64;

        Ok(true)
    }

    /// Run until the budget is spent or nothing is left to explore.
    pub fn run(&mut self) -> Result<&CrosswordState> {
        while self.step()? {}
        Ok(self.best_state())
    }

    /// The best terminal state witnessed, or the root state if no iteration
    /// has produced one yet.
    #[must_use]
    pub fn best_state(&self) -> &CrosswordState {
        match &self.best {
            Some(best) => &best.state,
            None => &self.tree.root_node().state,
        }
    }

    /// Reward of [`Search::best_state`].
    #[must_use]
    pub fn best_reward(&self) -> f64 {
        match &self.best {
            Some(best) => best.reward,
            None => self.tree.root_node().state.reward(),
        }
    }

    /// Per-iteration summary rows.
    #[must_use]
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree statistics.
    #[must_use]
    pub fn tree_stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Descend while nodes are fully expanded and alive; stop at the first
    /// node with untried actions or a terminal one.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if node.is_terminal || !node.is_fully_expanded() {
                return current;
            }
            current = self.best_child(current);
        }
    }

    /// The child maximising UCB1; ties go to the earliest child.
    fn best_child(&self, id: NodeId) -> NodeId {
        let node = self.tree.get(id);
        debug_assert!(!node.children.is_empty());

        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &node.children {
            let score = ucb1(
                node.visits,
                self.tree.get(child),
                self.config.exploration_constant,
            );
            if score > best_score {
                best = child;
                best_score = score;
            }
        }
        best
    }

    /// Turn the node's next untried action into a child node.
    fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let action = self
            .tree
            .get(id)
            .peek_untried()
            .ok_or_else(|| Error::internal(format!("nothing to expand under {id}")))?;

        let child_state = self.tree.get(id).state.apply(action)?;
        let depth = self.tree.get(id).depth + 1;
        let child_id = self
            .tree
            .alloc(SearchNode::new(id, Some(action), child_state, depth));

        let node = self.tree.get_mut(id);
        node.next_untried += 1;
        node.children.push(child_id);
        self.stats.nodes_expanded += 1;
        Ok(child_id)
    }

    /// Add the playout reward to every node on the path to the root, and
    /// bubble subtree exhaustion on the way.
    fn backpropagate(&mut self, from: NodeId, value: f64) {
        let mut current = from;
        while !current.is_none() {
            let exhausted = {
                let node = self.tree.get(current);
                node.is_terminal
                    || (node.is_fully_expanded()
                        && node
                            .children
                            .iter()
                            .all(|&child| self.tree.get(child).exhausted))
            };

            let node = self.tree.get_mut(current);
            node.visits += 1;
            node.total_reward += value;
            node.exhausted = exhausted;
            current = node.parent;
        }
    }

    fn offer_best(&mut self, state: CrosswordState) {
        let reward = state.reward();
        let improved = self.best.as_ref().map_or(true, |best| reward > best.reward);
        if improved {
            log::debug!(
                "iteration {}: best reward now {:.3} ({}/{} entries)",
                self.stats.iterations,
                reward,
                state.filled_entries(),
                state.total_entries()
            );
            self.best = Some(BestState { reward, state });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Layout};
    use crate::words::WordIndex;
    use std::sync::Arc;

    fn initial(rows: usize, cols: usize, words: &[&str]) -> CrosswordState {
        let grid = Arc::new(Grid::build(Layout::blank(rows, cols), &[]).unwrap());
        let index = Arc::new(WordIndex::build(words.iter().copied(), grid.lengths(), None));
        Grid::initial_state(&grid, &index)
    }

    #[test]
    fn test_search_finds_unique_fill() {
        let state = initial(2, 2, &["AB", "CD", "AC", "BD"]);
        let config = SearchConfig::default().with_max_iterations(100);

        let mut search = Search::new(state, config);
        let best = search.run().unwrap();

        assert!(best.is_terminal());
        assert_eq!(best.reward(), 1.0);
    }

    #[test]
    fn test_search_respects_budget() {
        // Ten iterations cannot exhaust this tree, so the budget is what
        // stops the run.
        let state = initial(3, 3, &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"]);
        let config = SearchConfig::default().with_max_iterations(10);

        let mut search = Search::new(state, config);
        search.run().unwrap();

        assert_eq!(search.stats().iterations, 10);
        assert_eq!(search.history().len(), 10);
    }

    #[test]
    fn test_search_stops_when_root_exhausted() {
        // Both root actions dead-end immediately, so the whole tree is two
        // terminal children deep and exhausts long before the budget.
        let state = initial(2, 2, &["AB", "CD"]);
        let config = SearchConfig::default().with_max_iterations(100);

        let mut search = Search::new(state, config);
        search.run().unwrap();

        assert!(search.stats().iterations < 100);
        assert!(search.best_reward() <= 0.5);
    }

    #[test]
    fn test_search_on_terminal_root() {
        // No entries at all: the initial state is already finished.
        let state = initial(1, 1, &["AB"]);
        assert!(state.is_terminal());

        let mut search = Search::new(state, SearchConfig::default());
        let best = search.run().unwrap();

        assert_eq!(best.reward(), 1.0);
        assert_eq!(search.stats().iterations, 0);
        assert!(search.history().is_empty());
    }

    #[test]
    fn test_best_reward_never_decreases() {
        let state = initial(3, 3, &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"]);
        let config = SearchConfig::default().with_max_iterations(200);

        let mut search = Search::new(state, config);
        search.run().unwrap();

        let rewards: Vec<f64> = search
            .history()
            .iter()
            .map(|r| r.best_reward_so_far)
            .collect();
        assert!(rewards.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_search_is_deterministic() {
        let config = SearchConfig::default().with_max_iterations(150).with_seed(9);

        let mut first = Search::new(initial(3, 3, &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"]), config.clone());
        let mut second = Search::new(initial(3, 3, &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"]), config);

        let grid1 = first.run().unwrap().render().to_csv();
        let grid2 = second.run().unwrap().render().to_csv();

        assert_eq!(grid1, grid2);
        assert_eq!(first.history(), second.history());
    }

    #[test]
    fn test_stop_on_perfect() {
        let state = initial(2, 2, &["AB", "CD", "AC", "BD"]);
        let config = SearchConfig::default()
            .with_max_iterations(1000)
            .with_stop_on_perfect(true);

        let mut search = Search::new(state, config);
        search.run().unwrap();

        assert_eq!(search.best_reward(), 1.0);
        assert!(search.stats().iterations < 1000);
    }
}
