//! Prim's minimum spanning tree, grown one edge per iteration.

use super::{Algorithm, LiveRun, Run};
use crate::graph::{Edge, Graph, NodeId};
use crate::step::{EdgeRef, SpanningStep, Step, VisualState};
use std::collections::{HashSet, VecDeque};

/// Incremental Prim
///
/// Each iteration scans every edge in insertion order, emits a `candidate`
/// step for each edge crossing the tree boundary, then accepts the lightest
/// one. The first crossing edge wins ties. Accepted edges are oriented from
/// the tree side to the new node.
pub struct Prim {
    edges: Vec<Edge>,
    node_count: usize,
    start: NodeId,
    in_tree: HashSet<NodeId>,
    total_weight: f64,
    accepted: usize,
    started: bool,
    pending: VecDeque<Step>,
    done: bool,
}

impl Prim {
    /// Creates the search seeded at `start`
    pub fn new(graph: &Graph, start: NodeId) -> Self {
        Self {
            edges: graph.edges().to_vec(),
            node_count: graph.len(),
            start,
            in_tree: HashSet::new(),
            total_weight: 0.0,
            accepted: 0,
            started: false,
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn complete(&mut self) -> Step {
        self.done = true;
        Step::new(
            SpanningStep::Complete {
                total_weight: self.total_weight,
                edges: self.accepted,
            },
            format!(
                "Minimum spanning tree complete: {} edge(s), total weight {}",
                self.accepted, self.total_weight
            ),
        )
    }

    fn grow(&mut self) {
        let mut best: Option<EdgeRef> = None;

        for edge in &self.edges {
            let a_in = self.in_tree.contains(&edge.a);
            let b_in = self.in_tree.contains(&edge.b);
            if a_in == b_in {
                continue;
            }
            let crossing = if a_in {
                EdgeRef::new(edge.a, edge.b, edge.weight)
            } else {
                EdgeRef::new(edge.b, edge.a, edge.weight)
            };
            self.pending.push_back(Step::new(
                SpanningStep::Candidate { edge: crossing },
                format!(
                    "Edge {}-{} (weight {}) crosses the tree boundary",
                    crossing.from, crossing.to, crossing.weight
                ),
            ));
            if best.map_or(true, |b| crossing.weight < b.weight) {
                best = Some(crossing);
            }
        }

        match best {
            Some(edge) => {
                self.in_tree.insert(edge.to);
                self.total_weight += edge.weight;
                self.accepted += 1;
                self.pending.push_back(Step::new(
                    SpanningStep::Accept {
                        edge,
                        total_weight: self.total_weight,
                    },
                    format!(
                        "Add the lightest crossing edge {}-{} (weight {}); tree weight is now {}",
                        edge.from, edge.to, edge.weight, self.total_weight
                    ),
                ));
            }
            None => {
                let step = self.complete();
                self.pending.push_back(step);
            }
        }
    }
}

impl Iterator for Prim {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.done {
                return None;
            }
            if !self.started {
                self.started = true;
                self.in_tree.insert(self.start);
                return Some(Step::new(
                    SpanningStep::TreeStart { node: self.start },
                    format!("Start the tree at node {}", self.start),
                ));
            }
            if self.in_tree.len() >= self.node_count {
                return Some(self.complete());
            }
            self.grow();
        }
    }
}

pub(crate) fn start(graph: &Graph, start: NodeId) -> Run {
    Run::Live(LiveRun::new(
        Algorithm::Prim,
        VisualState::for_spanning_tree(),
        Box::new(Prim::new(graph, start)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn square() -> Graph {
        let mut graph = Graph::new(false, true);
        for id in 0..4 {
            graph.add_node(n(id)).unwrap();
        }
        graph.add_edge(n(0), n(1), 1.0).unwrap();
        graph.add_edge(n(1), n(2), 2.0).unwrap();
        graph.add_edge(n(2), n(3), 1.0).unwrap();
        graph.add_edge(n(3), n(0), 3.0).unwrap();
        graph.add_edge(n(0), n(2), 4.0).unwrap();
        graph
    }

    #[test]
    fn test_prim_total_weight() {
        let steps: Vec<Step> = Prim::new(&square(), n(0)).collect();
        let accepted = steps.iter().filter(|s| s.name() == "accept").count();
        assert_eq!(accepted, 3);
        match steps.last().map(Step::kind) {
            Some(StepKind::Spanning(SpanningStep::Complete { total_weight, edges })) => {
                assert_eq!(*total_weight, 4.0);
                assert_eq!(*edges, 3);
            }
            other => panic!("unexpected final step: {other:?}"),
        }
    }

    #[test]
    fn test_accepted_edges_point_away_from_tree() {
        let steps: Vec<Step> = Prim::new(&square(), n(2)).collect();
        let first = steps.iter().find_map(|s| match s.kind() {
            StepKind::Spanning(SpanningStep::Accept { edge, .. }) => Some(*edge),
            _ => None,
        });
        assert_eq!(first, Some(EdgeRef::new(n(2), n(3), 1.0)));
    }
}
