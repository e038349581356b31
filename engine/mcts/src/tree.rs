//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous Vec and reference each other by `NodeId`
//! index. Parent links point upward for backpropagation only; ownership
//! runs strictly parent-to-child through the action list, so the tree is
//! cycle-free and dropped wholesale at the end of each move decision.

use connect4::Board;

use crate::node::{NodeId, SearchNode};

/// Arena-backed search tree, private to one move decision.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only a fresh root.
    pub fn new() -> Self {
        Self {
            nodes: vec![SearchNode::new_root()],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a child under `parent` and return its ID.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        action: u8,
        board: Option<Board>,
        bonus: f64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(SearchNode::new_child(parent, action, board, bonus));
        self.get_mut(parent).children.push((action, id));
        id
    }

    /// Child of `node` maximizing the UCT score.
    ///
    /// Unvisited children score infinity, so each is taken once before any
    /// sibling is revisited; ties keep the first-seen child.
    pub fn select_child(&self, node: NodeId, c: f64) -> Option<NodeId> {
        let parent_visits = self.get(node).visits;
        let mut best: Option<(f64, NodeId)> = None;
        for &(_, child_id) in &self.get(node).children {
            let score = self.get(child_id).uct(parent_visits, c);
            match best {
                Some((top, _)) if score <= top => {}
                _ => best = Some((score, child_id)),
            }
        }
        best.map(|(_, id)| id)
    }

    /// Walk from `leaf` to the root inclusive, crediting every node on the
    /// path with one visit and the full reward. No per-ply sign flip.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = leaf;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.value += reward;
            current = node.parent;
        }
    }

    /// Root child with the highest visit count, first-seen tie-break.
    /// Returns (action, visits).
    pub fn best_action(&self) -> Option<(u8, u32)> {
        let mut best: Option<(u8, u32)> = None;
        for &(action, id) in &self.get(self.root).children {
            let visits = self.get(id).visits;
            match best {
                Some((_, top)) if visits <= top => {}
                _ => best = Some((action, visits)),
            }
        }
        best
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}
