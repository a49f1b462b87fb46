//! Kruskal's minimum spanning tree over weight-sorted edges.

use super::union_find::UnionFind;
use super::{Algorithm, LiveRun, Run};
use crate::graph::{Edge, Graph};
use crate::step::{EdgeRef, SpanningStep, Step, VisualState};
use std::collections::VecDeque;

/// Incremental Kruskal
///
/// Edges are stably sorted by weight, so equal weights keep insertion
/// order. Each edge yields a `candidate` step followed by `accept` or
/// `reject`. Stops as soon as `V - 1` edges have been accepted.
pub struct Kruskal {
    sorted: Vec<Edge>,
    cursor: usize,
    forest: UnionFind,
    needed: usize,
    accepted: usize,
    total_weight: f64,
    pending: VecDeque<Step>,
    done: bool,
}

impl Kruskal {
    /// Creates the search over the edges of `graph`
    pub fn new(graph: &Graph) -> Self {
        let mut sorted = graph.edges().to_vec();
        sorted.sort_by(|x, y| x.weight.total_cmp(&y.weight));
        Self {
            sorted,
            cursor: 0,
            forest: UnionFind::new(graph.node_ids()),
            needed: graph.len().saturating_sub(1),
            accepted: 0,
            total_weight: 0.0,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl Iterator for Kruskal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(step) = self.pending.pop_front() {
            return Some(step);
        }
        if self.done {
            return None;
        }

        let next = if self.accepted < self.needed {
            self.sorted.get(self.cursor).cloned()
        } else {
            None
        };
        let Some(next) = next else {
            self.done = true;
            return Some(Step::new(
                SpanningStep::Complete {
                    total_weight: self.total_weight,
                    edges: self.accepted,
                },
                format!(
                    "Minimum spanning tree complete: {} edge(s), total weight {}",
                    self.accepted, self.total_weight
                ),
            ));
        };
        let edge = EdgeRef::new(next.a, next.b, next.weight);
        self.cursor += 1;

        if self.forest.union(edge.from, edge.to) {
            self.accepted += 1;
            self.total_weight += edge.weight;
            self.pending.push_back(Step::new(
                SpanningStep::Accept {
                    edge,
                    total_weight: self.total_weight,
                },
                format!(
                    "Nodes {} and {} are in different components: accept; tree weight is now {}",
                    edge.from, edge.to, self.total_weight
                ),
            ));
        } else {
            self.pending.push_back(Step::new(
                SpanningStep::Reject { edge },
                format!(
                    "Nodes {} and {} are already connected: edge would close a cycle",
                    edge.from, edge.to
                ),
            ));
        }

        Some(Step::new(
            SpanningStep::Candidate { edge },
            format!(
                "Next lightest edge: {}-{} (weight {})",
                edge.from, edge.to, edge.weight
            ),
        ))
    }
}

pub(crate) fn start(graph: &Graph) -> Run {
    Run::Live(LiveRun::new(
        Algorithm::Kruskal,
        VisualState::for_spanning_tree(),
        Box::new(Kruskal::new(graph)),
    ))
}
