//! Tree nodes for the search arena.
//!
//! Nodes live in a flat arena and point at each other through `NodeId`
//! indices. Every node exclusively owns the state its action produced;
//! parents stay intact while siblings are explored, which is why states are
//! cloned on apply rather than mutated in place.

use crate::core::SearchRng;
use crate::state::{Action, CrosswordState};

/// Index into the search tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
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
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Node(NONE)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}

/// One node of the search tree.
#[derive(Debug)]
pub struct SearchNode {
    /// Parent node (NONE for the root).
    pub parent: NodeId,

    /// The action that produced this node's state (None for the root).
    pub action: Option<Action>,

    /// The state this node owns.
    pub state: CrosswordState,

    /// Actions not yet turned into children, in `legal_actions` order.
    /// `untried[next_untried..]` is the remaining set.
    pub untried: Vec<Action>,

    /// Cursor into `untried`.
    pub next_untried: usize,

    /// Expanded children, in expansion order. `children[i]` was produced by
    /// `untried[i]`.
    pub children: Vec<NodeId>,

    /// Visit count.
    pub visits: u32,

    /// Sum of rollout rewards backed up through this node.
    pub total_reward: f64,

    /// Whether the owned state is terminal.
    pub is_terminal: bool,

    /// Whether every state reachable from here is terminal.
    pub exhausted: bool,

    /// Depth in the tree (root = 0).
    pub depth: u16,
}

impl SearchNode {
    /// Create a node for a state reached via `action` from `parent`.
    #[must_use]
    pub fn new(
        parent: NodeId,
        action: Option<Action>,
        state: CrosswordState,
        depth: u16,
    ) -> Self {
        let untried = state.legal_actions();
        let is_terminal = state.is_terminal();
        Self {
            parent,
            action,
            state,
            untried,
            next_untried: 0,
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
            is_terminal,
            exhausted: is_terminal,
            depth,
        }
    }

    /// Create a root node.
    #[must_use]
    pub fn root(state: CrosswordState) -> Self {
        Self::new(NodeId::NONE, None, state, 0)
    }

    /// Whether every untried action has been expanded. Terminal nodes have
    /// no actions and count as fully expanded.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.next_untried == self.untried.len()
    }

    /// The next action to expand, if any remains.
    #[must_use]
    pub fn peek_untried(&self) -> Option<Action> {
        self.untried.get(self.next_untried).copied()
    }

    /// Mean reward of the subtree below this node.
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.visits)
        }
    }
}

/// UCB1 score of a child under its parent.
///
/// `W/N + c * sqrt(ln N_parent / N_child)`; unvisited children score
/// infinite so they are taken first.
#[must_use]
pub fn ucb1(parent_visits: u32, child: &SearchNode, exploration: f64) -> f64 {
    if child.visits == 0 {
        return f64::INFINITY;
    }
    let ln_parent = f64::from(parent_visits.max(1)).ln();
    child.mean_reward() + exploration * (ln_parent / f64::from(child.visits)).sqrt()
}

/// Play uniformly random actions from `state` until it becomes terminal.
///
/// Runs on a disposable clone chain; tree nodes are never created here.
pub fn playout(
    mut state: CrosswordState,
    rng: &mut SearchRng,
) -> crate::core::Result<CrosswordState> {
    while let Some(action) = state.random_action(rng) {
        state = state.apply(action)?;
    }
    Ok(state)
}
