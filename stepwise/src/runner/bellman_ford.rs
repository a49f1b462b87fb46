//! Bellman-Ford, one relaxation attempt at a time.

use super::{Algorithm, LiveRun, Run};
use crate::graph::{Graph, NodeId};
use crate::step::{format_distance, EdgeRef, PathStep, Step, VisualState};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Announce,
    Relax,
    Check,
    Done,
}

/// Incremental Bellman-Ford from a single source
///
/// Runs exactly `V - 1` passes. Each pass announces itself with a `pass`
/// step, then attempts every edge in insertion order; undirected edges are
/// attempted in both directions. A final check pass looks for an edge that
/// can still be relaxed and ends with a `verdict` step.
pub struct BellmanFord {
    attempts: Vec<EdgeRef>,
    distances: HashMap<NodeId, f64>,
    passes: usize,
    pass: usize,
    cursor: usize,
    phase: Phase,
    pending: VecDeque<Step>,
}

impl BellmanFord {
    /// Creates the search with every distance infinite except the source
    pub fn new(graph: &Graph, source: NodeId) -> Self {
        let mut attempts = Vec::with_capacity(graph.edge_count() * 2);
        for edge in graph.edges() {
            attempts.push(EdgeRef::new(edge.a, edge.b, edge.weight));
            if !edge.directed {
                attempts.push(EdgeRef::new(edge.b, edge.a, edge.weight));
            }
        }

        let distances = graph
            .node_ids()
            .map(|id| (id, if id == source { 0.0 } else { f64::INFINITY }))
            .collect();
        let passes = graph.len().saturating_sub(1);

        Self {
            attempts,
            distances,
            passes,
            pass: 1,
            cursor: 0,
            phase: if passes > 0 { Phase::Announce } else { Phase::Check },
            pending: VecDeque::new(),
        }
    }

    fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    fn relax(&mut self, edge: EdgeRef) -> Step {
        let EdgeRef { from, to, weight } = edge;
        let base = self.distance(from);
        let previous = self.distance(to);
        let candidate = base + weight;
        let improved = candidate < previous;

        let explanation = if base.is_infinite() {
            format!("Node {from} is not reached yet, so {from}→{to} cannot be relaxed")
        } else if improved {
            self.distances.insert(to, candidate);
            format!(
                "Relax {from}→{to}: {} + {weight} = {} beats {}",
                format_distance(base),
                format_distance(candidate),
                format_distance(previous)
            )
        } else {
            format!(
                "Relax {from}→{to}: {} + {weight} = {} does not beat {}",
                format_distance(base),
                format_distance(candidate),
                format_distance(previous)
            )
        };

        Step::new(
            PathStep::Relax {
                edge,
                previous,
                candidate,
                improved,
            },
            explanation,
        )
    }

    fn check(&mut self) -> Step {
        let offending = self
            .attempts
            .iter()
            .copied()
            .find(|e| self.distance(e.from) + e.weight < self.distance(e.to));

        match offending {
            Some(edge) => {
                self.pending.push_back(Step::new(
                    PathStep::Verdict {
                        negative_cycle: true,
                    },
                    "Negative cycle found: no valid shortest paths from the source",
                ));
                Step::new(
                    PathStep::NegativeCycle { edge },
                    format!(
                        "Edge {}→{} can still be relaxed after {} passes",
                        edge.from, edge.to, self.passes
                    ),
                )
            }
            None => Step::new(
                PathStep::Verdict {
                    negative_cycle: false,
                },
                "Shortest paths finalized: no edge can be relaxed further",
            ),
        }
    }
}

impl Iterator for BellmanFord {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Announce => {
                    self.phase = Phase::Relax;
                    return Some(Step::new(
                        PathStep::Pass {
                            pass: self.pass,
                            total: self.passes,
                        },
                        format!("Pass {} of {}: try every edge", self.pass, self.passes),
                    ));
                }
                Phase::Relax => {
                    if let Some(edge) = self.attempts.get(self.cursor).copied() {
                        self.cursor += 1;
                        return Some(self.relax(edge));
                    }
                    self.cursor = 0;
                    if self.pass < self.passes {
                        self.pass += 1;
                        self.phase = Phase::Announce;
                    } else {
                        self.phase = Phase::Check;
                    }
                }
                Phase::Check => {
                    self.phase = Phase::Done;
                    return Some(self.check());
                }
                Phase::Done => return self.pending.pop_front(),
            }
        }
    }
}

pub(crate) fn start(graph: &Graph, source: NodeId) -> Run {
    Run::Live(LiveRun::new(
        Algorithm::BellmanFord,
        VisualState::for_distances(graph.node_ids(), source),
        Box::new(BellmanFord::new(graph, source)),
    ))
}
