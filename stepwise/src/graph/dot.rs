//! DOT export for debugging topologies.
//!
//! Renders a [`Graph`] through petgraph's `Dot` formatter so a topology can
//! be pasted into Graphviz when a run does something unexpected.

use super::model::Graph;
use super::NodeId;
use petgraph::dot::{Config, Dot};
use petgraph::{Directed, EdgeType, Undirected};
use std::collections::HashMap;

impl Graph {
    /// Renders the graph in Graphviz DOT format
    ///
    /// Nodes are labelled with their id (and label, if any); edges carry
    /// their weight when the graph is weighted.
    pub fn to_dot(&self) -> String {
        if self.is_directed() {
            render::<Directed>(self)
        } else {
            render::<Undirected>(self)
        }
    }
}

fn render<Ty: EdgeType>(graph: &Graph) -> String {
    let mut pg: petgraph::Graph<String, String, Ty> = petgraph::Graph::default();
    let mut indices: HashMap<NodeId, _> = HashMap::new();

    for id in graph.node_ids() {
        let label = match graph.node(id).and_then(|attrs| attrs.label()) {
            Some(label) => format!("{id}: {label}"),
            None => id.to_string(),
        };
        indices.insert(id, pg.add_node(label));
    }

    for edge in graph.edges() {
        if let (Some(&a), Some(&b)) = (indices.get(&edge.a), indices.get(&edge.b)) {
            pg.add_edge(a, b, format!("{}", edge.weight));
        }
    }

    let config: &[Config] = if graph.is_weighted() {
        &[]
    } else {
        &[Config::EdgeNoLabel]
    };
    format!("{}", Dot::with_config(&pg, config))
}
