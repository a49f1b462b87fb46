//! Capacity and flow matrices for max-flow runs
//!
//! A [`FlowNetwork`] is derived from a directed, weighted [`Graph`]. Node
//! identifiers are mapped to dense indices in insertion order so that the
//! residual search can work on plain matrices.

use super::model::{Edge, Graph};
use super::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense capacity/flow representation of a directed network
///
/// `capacity[u][v]` is the sum of the weights of every edge from `u` to
/// `v`, so parallel edges pool their capacity. `flow[u][v]` starts at zero
/// and is only changed by the max-flow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    capacity: Vec<Vec<f64>>,
    flow: Vec<Vec<f64>>,
    edges: Vec<Edge>,
}

impl FlowNetwork {
    /// Builds the network from the edges of a graph
    pub fn from_graph(graph: &Graph) -> Self {
        Self::from_edges(
            graph.node_ids(),
            graph.edges().iter().map(|e| (e.a, e.b, e.weight)),
        )
    }

    /// Builds the network from a node list and `(tail, head, capacity)` triples
    ///
    /// Unlike [`Graph`], parallel edges are allowed here; their capacities
    /// are summed. Edges naming unknown nodes are ignored.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId, f64)>,
    ) -> Self {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        let index: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let n = nodes.len();
        let mut capacity = vec![vec![0.0; n]; n];
        let mut kept = Vec::new();

        for (a, b, weight) in edges {
            if let (Some(&u), Some(&v)) = (index.get(&a), index.get(&b)) {
                capacity[u][v] += weight;
                kept.push(Edge {
                    a,
                    b,
                    weight,
                    directed: true,
                });
            }
        }

        Self {
            nodes,
            index,
            capacity,
            flow: vec![vec![0.0; n]; n],
            edges: kept,
        }
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the network has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the dense index of a node
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Returns the node at a dense index
    pub fn node_at(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    /// Returns the nodes in index order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the original edges, parallel edges included
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the pooled capacity from `a` to `b`
    pub fn capacity(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.index_of(a), self.index_of(b)) {
            (Some(u), Some(v)) => self.capacity[u][v],
            _ => 0.0,
        }
    }

    /// Returns the current flow from `a` to `b`
    pub fn flow(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.index_of(a), self.index_of(b)) {
            (Some(u), Some(v)) => self.flow[u][v],
            _ => 0.0,
        }
    }

    /// Zeroes every flow value
    pub fn reset_flow(&mut self) {
        for row in &mut self.flow {
            row.iter_mut().for_each(|f| *f = 0.0);
        }
    }

    pub(crate) fn capacity_at(&self, u: usize, v: usize) -> f64 {
        self.capacity[u][v]
    }

    pub(crate) fn flow_at(&self, u: usize, v: usize) -> f64 {
        self.flow[u][v]
    }

    /// Forward residual capacity `capacity[u][v] - flow[u][v]`
    pub(crate) fn forward_residual(&self, u: usize, v: usize) -> f64 {
        self.capacity[u][v] - self.flow[u][v]
    }

    pub(crate) fn add_flow(&mut self, u: usize, v: usize, delta: f64) {
        self.flow[u][v] += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    #[test]
    fn test_parallel_edges_sum_capacity() {
        let network = FlowNetwork::from_edges(
            [n(0), n(1)],
            [(n(0), n(1), 2.0), (n(0), n(1), 3.5), (n(1), n(0), 1.0)],
        );
        assert_eq!(network.capacity(n(0), n(1)), 5.5);
        assert_eq!(network.capacity(n(1), n(0)), 1.0);
        assert_eq!(network.edges().len(), 3);
    }

    #[test]
    fn test_flow_starts_at_zero_and_resets() {
        let mut network = FlowNetwork::from_edges([n(0), n(1)], [(n(0), n(1), 4.0)]);
        assert_eq!(network.flow(n(0), n(1)), 0.0);

        network.add_flow(0, 1, 3.0);
        assert_eq!(network.forward_residual(0, 1), 1.0);

        network.reset_flow();
        assert_eq!(network.flow(n(0), n(1)), 0.0);
    }

    #[test]
    fn test_from_graph_uses_insertion_order() {
        let mut graph = Graph::new(true, true);
        graph.add_node(n(5)).unwrap();
        graph.add_node(n(2)).unwrap();
        graph.add_edge(n(5), n(2), 7.0).unwrap();

        let network = FlowNetwork::from_graph(&graph);
        assert_eq!(network.index_of(n(5)), Some(0));
        assert_eq!(network.node_at(1), n(2));
        assert_eq!(network.capacity(n(5), n(2)), 7.0);
    }
}
