//! Arena-based search tree.
//!
//! Nodes sit in a flat `Vec` and reference each other by `NodeId` index.
//! Parent-to-child and child-to-parent links are both ids, so ownership
//! stays with the arena and backpropagation needs no reference juggling.

use super::node::{NodeId, SearchNode};

/// Flat arena holding the whole search tree.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree around a root node.
    #[must_use]
    pub fn new(root: SearchNode) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(1024),
            root: NodeId::new(0),
        };
        tree.nodes.push(root);
        tree
    }

    /// The root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never true after construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Aggregate statistics over the arena.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal).count(),
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Layout};
    use crate::state::CrosswordState;
    use crate::words::WordIndex;
    use std::sync::Arc;

    fn state() -> CrosswordState {
        let grid = Arc::new(Grid::build(Layout::blank(2, 2), &[]).unwrap());
        let index = Arc::new(WordIndex::build(
            ["AB", "CD", "AC", "BD"].iter().copied(),
            grid.lengths(),
            None,
        ));
        Grid::initial_state(&grid, &index)
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(SearchNode::root(state()));

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.root_node().parent.is_none());
    }

    #[test]
    fn test_tree_alloc_and_get_mut() {
        let root_state = state();
        let child_state = root_state.apply(root_state.legal_actions()[0]).unwrap();
        let mut tree = SearchTree::new(SearchNode::root(root_state));

        let child = SearchNode::new(tree.root(), None, child_state, 1);
        let child_id = tree.alloc(child);

        assert_eq!(child_id, NodeId::new(1));
        assert_eq!(tree.len(), 2);

        tree.get_mut(child_id).visits = 7;
        assert_eq!(tree.get(child_id).visits, 7);
    }

    #[test]
    fn test_tree_stats() {
        let root_state = state();
        let child_state = root_state.apply(root_state.legal_actions()[0]).unwrap();
        let mut tree = SearchTree::new(SearchNode::root(root_state));
        tree.alloc(SearchNode::new(tree.root(), None, child_state, 1));

        let stats = tree.stats();
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.terminal_count, 0);
    }
}
