//! Monte Carlo Tree Search over the crossword state space.
//!
//! Single-player MCTS: UCB1 selection, one expansion per iteration, uniform
//! random playouts, and plain accumulating backpropagation (no sign flips —
//! the two-player backup would punish good lines here). The run's result is
//! the best terminal state witnessed anywhere during the search.
//!
//! Nodes are arena-allocated and each one owns the state its action
//! produced, so sibling subtrees stay independently explorable.

pub mod config;
pub mod node;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use search::Search;
pub use stats::{IterationRecord, SearchStats};
pub use tree::{SearchTree, TreeStats};
