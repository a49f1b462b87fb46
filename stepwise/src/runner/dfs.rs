//! Depth-first traversal, computed up front with an explicit stack.

use super::{Algorithm, Run};
use crate::graph::{Graph, NodeId};
use crate::step::{Step, StepSequence, TraversalStep, VisualState};
use std::collections::{HashMap, HashSet};

struct Frame {
    node: NodeId,
    parent: Option<NodeId>,
    neighbours: Vec<NodeId>,
    next: usize,
}

impl Frame {
    fn new(node: NodeId, parent: Option<NodeId>, adjacency: &HashMap<NodeId, Vec<(NodeId, f64)>>) -> Self {
        let mut neighbours: Vec<NodeId> = adjacency
            .get(&node)
            .map(|list| list.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default();
        neighbours.sort_unstable();
        neighbours.dedup();
        Self {
            node,
            parent,
            neighbours,
            next: 0,
        }
    }
}

/// Returns the full DFS step list from `source`
///
/// Neighbours are explored in ascending id order. Every edge looked at
/// yields `explore-edge`, followed by either a `visit` of the new node or
/// an `edge-reset` when the node was already visited. When a node runs out
/// of neighbours it emits `finish` and, unless it is the source,
/// `backtrack` to its parent.
pub fn dfs_steps(graph: &Graph, source: NodeId) -> Vec<Step> {
    let adjacency = graph.adjacency();
    let mut visited = HashSet::new();
    let mut steps = Vec::new();
    let mut stack = Vec::new();

    visited.insert(source);
    steps.push(Step::new(
        TraversalStep::Visit {
            node: source,
            parent: None,
        },
        format!("Start the search at node {source}"),
    ));
    stack.push(Frame::new(source, None, &adjacency));

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        match frame.neighbours.get(frame.next).copied() {
            Some(next) => {
                frame.next += 1;
                steps.push(Step::new(
                    TraversalStep::ExploreEdge {
                        from: node,
                        to: next,
                    },
                    format!("Look along edge {node}-{next}"),
                ));

                if visited.insert(next) {
                    steps.push(Step::new(
                        TraversalStep::Visit {
                            node: next,
                            parent: Some(node),
                        },
                        format!("Node {next} is new: go deeper"),
                    ));
                    stack.push(Frame::new(next, Some(node), &adjacency));
                } else {
                    steps.push(Step::new(
                        TraversalStep::EdgeReset {
                            from: node,
                            to: next,
                        },
                        format!("Node {next} was already visited: skip edge {node}-{next}"),
                    ));
                }
            }
            None => {
                let parent = frame.parent;
                stack.pop();
                steps.push(Step::new(
                    TraversalStep::Finish { node },
                    format!("Every neighbour of node {node} has been explored"),
                ));
                if let Some(parent) = parent {
                    steps.push(Step::new(
                        TraversalStep::Backtrack {
                            from: node,
                            to: parent,
                        },
                        format!("Backtrack from node {node} to node {parent}"),
                    ));
                }
            }
        }
    }

    steps.push(Step::new(
        TraversalStep::Complete {
            visited: visited.len(),
        },
        format!("DFS complete: visited {} node(s)", visited.len()),
    ));
    steps
}

pub(crate) fn start(graph: &Graph, source: NodeId) -> Run {
    Run::Precomputed(StepSequence::with_steps(
        Algorithm::Dfs,
        VisualState::for_traversal(source),
        dfs_steps(graph, source),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn path_graph() -> Graph {
        let mut graph = Graph::new(false, false);
        for id in 0..4 {
            graph.add_node(n(id)).unwrap();
        }
        graph.add_edge(n(0), n(2), 1.0).unwrap();
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        graph.add_edge(n(1), n(2), 1.0).unwrap();
        graph.add_edge(n(2), n(3), 1.0).unwrap();
        graph
    }

    #[test]
    fn test_dfs_visits_in_ascending_neighbour_order() {
        let steps = dfs_steps(&path_graph(), n(0));
        let order: Vec<NodeId> = steps
            .iter()
            .filter_map(|s| match s.kind() {
                StepKind::Traversal(TraversalStep::Visit { node, .. }) => Some(*node),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![n(0), n(1), n(2), n(3)]);
    }

    #[test]
    fn test_dfs_finishes_every_visited_node() {
        let steps = dfs_steps(&path_graph(), n(0));
        let finished = steps.iter().filter(|s| s.name() == "finish").count();
        let backtracks = steps.iter().filter(|s| s.name() == "backtrack").count();
        assert_eq!(finished, 4);
        assert_eq!(backtracks, 3);
        assert_eq!(steps.last().map(Step::name), Some("complete"));
    }

    #[test]
    fn test_dfs_single_node() {
        let mut graph = Graph::new(false, false);
        graph.add_node(n(7)).unwrap();
        let names: Vec<&str> = dfs_steps(&graph, n(7)).iter().map(Step::name).collect();
        assert_eq!(names, vec!["visit", "finish", "complete"]);
    }
}
