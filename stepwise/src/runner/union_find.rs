//! Disjoint-set forest used by Kruskal for cycle detection.

use crate::graph::NodeId;
use std::collections::HashMap;

/// Union-find with path compression and union by rank
///
/// `find` always returns a root, a node whose parent is itself. Path
/// compression only ever repoints nodes directly at that root.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<NodeId, NodeId>,
    rank: HashMap<NodeId, u32>,
}

impl UnionFind {
    /// Creates a forest with one singleton set per node
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut forest = Self::default();
        for node in nodes {
            forest.make_set(node);
        }
        forest
    }

    /// Adds `node` as a singleton set if it is not already present
    pub fn make_set(&mut self, node: NodeId) {
        self.parent.entry(node).or_insert(node);
        self.rank.entry(node).or_insert(0);
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if the forest has no elements
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `node`
    ///
    /// Unknown nodes become singleton sets.
    pub fn find(&mut self, node: NodeId) -> NodeId {
        self.make_set(node);

        let mut root = node;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = node;
        while current != root {
            let next = self.parent.get(&current).copied().unwrap_or(root);
            self.parent.insert(current, root);
            current = next;
        }

        root
    }

    /// Merges the sets containing `a` and `b`
    ///
    /// Returns false if they were already in the same set.
    pub fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank.get(&root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(&root_b).copied().unwrap_or(0);
        if rank_a < rank_b {
            self.parent.insert(root_a, root_b);
        } else if rank_a > rank_b {
            self.parent.insert(root_b, root_a);
        } else {
            self.parent.insert(root_b, root_a);
            self.rank.insert(root_a, rank_a + 1);
        }
        true
    }

    /// Returns true if `a` and `b` are in the same set
    pub fn connected(&mut self, a: NodeId, b: NodeId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Returns the number of disjoint sets
    pub fn components(&mut self) -> usize {
        let nodes: Vec<NodeId> = self.parent.keys().copied().collect();
        let mut roots: Vec<NodeId> = nodes.into_iter().map(|n| self.find(n)).collect();
        roots.sort();
        roots.dedup();
        roots.len()
    }
}
