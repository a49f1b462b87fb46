//! Breadth-first traversal, produced one dequeue at a time.

use super::{Algorithm, LiveRun, Run};
use crate::graph::{Graph, NodeId};
use crate::step::{Step, TraversalStep, VisualState};
use std::collections::{HashMap, HashSet, VecDeque};

/// Incremental BFS from a single source
///
/// Each dequeue yields a `visit` step followed by one `discover` step per
/// neighbour seen for the first time. Neighbours are examined in edge
/// insertion order. Nodes unreachable from the source are never visited.
pub struct Bfs {
    adjacency: HashMap<NodeId, Vec<(NodeId, f64)>>,
    queue: VecDeque<(NodeId, Option<NodeId>)>,
    seen: HashSet<NodeId>,
    pending: VecDeque<Step>,
    visited: usize,
    done: bool,
}

impl Bfs {
    /// Creates a traversal seeded with `source`
    pub fn new(graph: &Graph, source: NodeId) -> Self {
        let mut seen = HashSet::new();
        seen.insert(source);
        Self {
            adjacency: graph.adjacency(),
            queue: VecDeque::from([(source, None)]),
            seen,
            pending: VecDeque::new(),
            visited: 0,
            done: false,
        }
    }

    fn expand(&mut self, node: NodeId, parent: Option<NodeId>) {
        self.visited += 1;
        let explanation = match parent {
            Some(parent) => format!("Dequeue node {node} (reached from {parent}) and visit it"),
            None => format!("Dequeue source node {node} and visit it"),
        };
        self.pending
            .push_back(Step::new(TraversalStep::Visit { node, parent }, explanation));

        let neighbours = self.adjacency.get(&node).cloned().unwrap_or_default();
        for (next, _) in neighbours {
            if self.seen.insert(next) {
                self.queue.push_back((next, Some(node)));
                self.pending.push_back(Step::new(
                    TraversalStep::Discover {
                        from: node,
                        to: next,
                    },
                    format!("Discover node {next} via edge {node}-{next} and enqueue it"),
                ));
            }
        }
    }
}

impl Iterator for Bfs {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.done {
                return None;
            }
            match self.queue.pop_front() {
                Some((node, parent)) => self.expand(node, parent),
                None => {
                    self.done = true;
                    return Some(Step::new(
                        TraversalStep::Complete {
                            visited: self.visited,
                        },
                        format!("BFS complete: visited {} node(s)", self.visited),
                    ));
                }
            }
        }
    }
}

pub(crate) fn start(graph: &Graph, source: NodeId) -> Run {
    let mut initial = VisualState::for_traversal(source);
    initial.frontier.insert(source);
    Run::Live(LiveRun::new(
        Algorithm::Bfs,
        initial,
        Box::new(Bfs::new(graph, source)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn visits(steps: &[Step]) -> Vec<NodeId> {
        steps
            .iter()
            .filter_map(|s| match s.kind() {
                crate::step::StepKind::Traversal(TraversalStep::Visit { node, .. }) => Some(*node),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bfs_level_order() {
        let mut graph = Graph::new(false, false);
        for id in 0..5 {
            graph.add_node(n(id)).unwrap();
        }
        graph.add_edge(n(0), n(2), 1.0).unwrap();
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        graph.add_edge(n(1), n(3), 1.0).unwrap();
        graph.add_edge(n(2), n(3), 1.0).unwrap();

        let steps: Vec<Step> = Bfs::new(&graph, n(0)).collect();
        assert_eq!(visits(&steps), vec![n(0), n(2), n(1), n(3)]);

        // One discover per newly seen node
        assert_eq!(steps.iter().filter(|s| s.name() == "discover").count(), 3);
        assert_eq!(steps.last().map(Step::name), Some("complete"));
    }

    #[test]
    fn test_bfs_respects_direction() {
        let mut graph = Graph::new(true, false);
        for id in 0..3 {
            graph.add_node(n(id)).unwrap();
        }
        graph.add_edge(n(1), n(0), 1.0).unwrap();
        graph.add_edge(n(1), n(2), 1.0).unwrap();

        let steps: Vec<Step> = Bfs::new(&graph, n(0)).collect();
        assert_eq!(visits(&steps), vec![n(0)]);
    }
}
