//! Graph - the user-edited topology algorithms run against
//!
//! This module provides the node/edge store that collaborators mutate
//! between runs and that runners read once a run starts.
//!
//! # Design
//!
//! Nodes live in a map keyed by [`NodeId`] plus an insertion-order list;
//! edges are kept as an ordered list. Both orders are observable: BFS walks
//! neighbours in edge-insertion order, Prim and Kruskal break weight ties by
//! edge-list position, and Prim starts from the first inserted node when no
//! start node is given.
//!
//! Whether the graph is directed and whether it is weighted is fixed at
//! construction. In an undirected graph `(a, b)` and `(b, a)` share one
//! normalized [`EdgeKey`], so only one of them can exist.

use super::error::{GraphError, GraphResult};
use super::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Attributes attached to a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// Human-readable label (optional)
    label: Option<String>,
}

impl NodeAttrs {
    /// Creates attributes carrying a label
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    /// Returns the label if present
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Normalized identity of an edge
///
/// For undirected edges the endpoints are stored smallest first, so both
/// orientations produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Tail (or smaller endpoint when undirected)
    pub a: NodeId,
    /// Head (or larger endpoint when undirected)
    pub b: NodeId,
}

impl EdgeKey {
    /// Builds the key for an edge between `a` and `b`
    pub fn new(a: NodeId, b: NodeId, directed: bool) -> Self {
        if directed || a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// A weighted edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Tail of the edge (either endpoint when undirected)
    pub a: NodeId,
    /// Head of the edge (the other endpoint when undirected)
    pub b: NodeId,
    /// Weight, or capacity in a flow network
    pub weight: f64,
    /// Whether the edge only runs from `a` to `b`
    pub directed: bool,
}

impl Edge {
    /// Returns the normalized key of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b, self.directed)
    }

    /// Returns true if `node` is one of the endpoints
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// Returns the endpoint opposite `node`, if `node` is an endpoint
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A graph of nodes and weighted edges
///
/// # Example
///
/// ```
/// use stepwise::{Graph, NodeId};
///
/// let mut graph = Graph::new(false, true);
/// for id in 0..3 {
///     graph.add_node(NodeId::new(id)).unwrap();
/// }
/// graph.add_edge(NodeId::new(0), NodeId::new(1), 4.0).unwrap();
/// graph.add_edge(NodeId::new(1), NodeId::new(2), 1.0).unwrap();
///
/// // Undirected: the reverse orientation is the same edge
/// assert!(graph.add_edge(NodeId::new(2), NodeId::new(1), 7.0).is_err());
/// assert_eq!(graph.neighbors(NodeId::new(1)).len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Map from node ID to its attributes
    nodes: HashMap<NodeId, NodeAttrs>,
    /// Insertion order for deterministic iteration
    insertion_order: Vec<NodeId>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
}

impl Graph {
    /// Creates a new empty graph
    ///
    /// When `weighted` is false every edge is stored with weight 1.
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            nodes: HashMap::new(),
            insertion_order: Vec::new(),
            edges: Vec::new(),
            directed,
            weighted,
        }
    }

    /// Returns true if edges only run from `a` to `b`
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns true if edge weights are meaningful
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Returns the number of nodes in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node to the graph
    ///
    /// Returns an error if a node with the same ID already exists.
    pub fn add_node(&mut self, id: NodeId) -> GraphResult<()> {
        self.add_node_with_attrs(id, NodeAttrs::default())
    }

    /// Adds a node with a label
    pub fn add_node_with_label(&mut self, id: NodeId, label: impl Into<String>) -> GraphResult<()> {
        self.add_node_with_attrs(id, NodeAttrs::with_label(label))
    }

    fn add_node_with_attrs(&mut self, id: NodeId, attrs: NodeAttrs) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::duplicate_node(id));
        }

        self.insertion_order.push(id);
        self.nodes.insert(id, attrs);
        tracing::trace!(node = %id, "node added");
        Ok(())
    }

    /// Adds an edge between `a` and `b`
    ///
    /// The edge inherits the graph's directedness. On an unweighted graph
    /// `weight` is ignored and stored as 1.
    ///
    /// Returns an error if:
    /// - Either endpoint doesn't exist
    /// - `a == b`
    /// - The weight is not finite
    /// - An edge with the same normalized key already exists
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> GraphResult<()> {
        if a == b {
            return Err(GraphError::SelfLoop { node: a });
        }
        for missing in [a, b] {
            if !self.nodes.contains_key(&missing) {
                return Err(GraphError::EndpointNotFound { a, b, missing });
            }
        }

        let weight = if self.weighted { weight } else { 1.0 };
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight { weight });
        }

        let key = EdgeKey::new(a, b, self.directed);
        if self.edges.iter().any(|e| e.key() == key) {
            return Err(GraphError::duplicate_edge(a, b));
        }

        self.edges.push(Edge {
            a,
            b,
            weight,
            directed: self.directed,
        });
        tracing::trace!(%a, %b, weight, "edge added");
        Ok(())
    }

    /// Removes a node and every edge touching it
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<NodeAttrs> {
        let attrs = self
            .nodes
            .remove(&id)
            .ok_or_else(|| GraphError::node_not_found(id))?;

        self.insertion_order.retain(|n| *n != id);
        self.edges.retain(|e| !e.touches(id));
        tracing::trace!(node = %id, "node removed");
        Ok(attrs)
    }

    /// Removes the edge with the normalized key of `(a, b)`
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<Edge> {
        let key = EdgeKey::new(a, b, self.directed);
        let position = self
            .edges
            .iter()
            .position(|e| e.key() == key)
            .ok_or_else(|| GraphError::edge_not_found(a, b))?;

        Ok(self.edges.remove(position))
    }

    /// Returns the attributes of a node
    pub fn node(&self, id: NodeId) -> Option<&NodeAttrs> {
        self.nodes.get(&id)
    }

    /// Returns true if the node exists in the graph
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns an iterator over all node IDs in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.insertion_order.iter().copied()
    }

    /// Returns the edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge with the normalized key of `(a, b)`
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        let key = EdgeKey::new(a, b, self.directed);
        self.edges.iter().find(|e| e.key() == key)
    }

    /// Maps each node to its position in insertion order
    ///
    /// Runners that work on dense matrices use this to turn identifiers
    /// into row and column indices.
    pub fn index_map(&self) -> HashMap<NodeId, usize> {
        self.insertion_order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect()
    }

    /// Returns the neighbours of `id` with the connecting weight
    ///
    /// Neighbours appear in edge-insertion order. Directed edges are only
    /// followed from tail to head; undirected edges are followed from
    /// either end.
    pub fn neighbors(&self, id: NodeId) -> Vec<(NodeId, f64)> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.a == id {
                    Some((e.b, e.weight))
                } else if !e.directed && e.b == id {
                    Some((e.a, e.weight))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Returns the adjacency of every node, keyed by node
    pub fn adjacency(&self) -> HashMap<NodeId, Vec<(NodeId, f64)>> {
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, f64)>> = self
            .insertion_order
            .iter()
            .map(|id| (*id, Vec::new()))
            .collect();

        for e in &self.edges {
            if let Some(list) = adjacency.get_mut(&e.a) {
                list.push((e.b, e.weight));
            }
            if !e.directed {
                if let Some(list) = adjacency.get_mut(&e.b) {
                    list.push((e.a, e.weight));
                }
            }
        }

        adjacency
    }

    /// Returns the first edge with a negative weight
    pub fn first_negative_edge(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.weight < 0.0)
    }

    /// Returns the set of nodes reachable from `source` along edges
    pub fn reachable_from(&self, source: NodeId) -> HashSet<NodeId> {
        let adjacency = self.adjacency();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        if self.contains_node(source) {
            seen.insert(source);
            queue.push_back(source);
        }

        while let Some(node) = queue.pop_front() {
            for (next, _) in adjacency.get(&node).into_iter().flatten() {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }

        seen
    }

    /// Returns true if every node is reachable from the first node
    ///
    /// Meaningful for undirected graphs, where reachability is symmetric.
    /// An empty graph is considered connected.
    pub fn is_connected(&self) -> bool {
        match self.insertion_order.first() {
            Some(first) => self.reachable_from(*first).len() == self.nodes.len(),
            None => true,
        }
    }

    /// Clears all nodes and edges from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.insertion_order.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn graph_with_nodes(directed: bool, weighted: bool, count: u32) -> Graph {
        let mut graph = Graph::new(directed, weighted);
        for id in 0..count {
            graph.add_node(n(id)).unwrap();
        }
        graph
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(false, true);
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.is_connected());
    }

    #[test]
    fn test_duplicate_node_error() {
        let mut graph = graph_with_nodes(false, true, 1);
        let result = graph.add_node(n(0));
        assert!(matches!(result, Err(GraphError::DuplicateNode { .. })));
    }

    #[test]
    fn test_undirected_edges_are_deduplicated() {
        let mut graph = graph_with_nodes(false, true, 2);
        graph.add_edge(n(0), n(1), 3.0).unwrap();

        let result = graph.add_edge(n(1), n(0), 5.0);
        assert!(matches!(result, Err(GraphError::DuplicateEdge { .. })));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_directed_reverse_edge_is_distinct() {
        let mut graph = graph_with_nodes(true, true, 2);
        graph.add_edge(n(0), n(1), 3.0).unwrap();
        graph.add_edge(n(1), n(0), 5.0).unwrap();
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.add_edge(n(0), n(1), 1.0).is_err());
    }

    #[test]
    fn test_unweighted_defaults_to_one() {
        let mut graph = graph_with_nodes(false, false, 2);
        graph.add_edge(n(0), n(1), 42.0).unwrap();
        assert_eq!(graph.edges()[0].weight, 1.0);
    }

    #[test]
    fn test_self_loop_and_missing_endpoint() {
        let mut graph = graph_with_nodes(false, true, 1);
        assert!(matches!(
            graph.add_edge(n(0), n(0), 1.0),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            graph.add_edge(n(0), n(9), 1.0),
            Err(GraphError::EndpointNotFound { missing, .. }) if missing == n(9)
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut graph = graph_with_nodes(true, true, 2);
        assert!(matches!(
            graph.add_edge(n(0), n(1), f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_neighbors_follow_insertion_order() {
        let mut graph = graph_with_nodes(false, true, 4);
        graph.add_edge(n(0), n(3), 1.0).unwrap();
        graph.add_edge(n(1), n(0), 2.0).unwrap();
        graph.add_edge(n(0), n(2), 3.0).unwrap();

        let neighbours: Vec<NodeId> = graph.neighbors(n(0)).into_iter().map(|(v, _)| v).collect();
        assert_eq!(neighbours, vec![n(3), n(1), n(2)]);
    }

    #[test]
    fn test_directed_neighbors_tail_only() {
        let mut graph = graph_with_nodes(true, true, 2);
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        assert_eq!(graph.neighbors(n(0)).len(), 1);
        assert!(graph.neighbors(n(1)).is_empty());
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = graph_with_nodes(false, true, 3);
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        graph.add_edge(n(1), n(2), 1.0).unwrap();
        graph.add_edge(n(0), n(2), 1.0).unwrap();

        graph.remove_node(n(1)).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![n(0), n(2)]);
    }

    #[test]
    fn test_remove_edge_by_either_orientation() {
        let mut graph = graph_with_nodes(false, true, 2);
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        let removed = graph.remove_edge(n(1), n(0)).unwrap();
        assert_eq!(removed.a, n(0));
        assert_eq!(graph.edge_count(), 0);
        assert!(matches!(
            graph.remove_edge(n(0), n(1)),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_connectivity() {
        let mut graph = graph_with_nodes(false, true, 4);
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        graph.add_edge(n(2), n(3), 1.0).unwrap();
        assert!(!graph.is_connected());

        graph.add_edge(n(1), n(2), 1.0).unwrap();
        assert!(graph.is_connected());
    }
}
