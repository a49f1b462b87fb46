//! Edmonds-Karp maximum flow and the minimum cut it certifies.
//!
//! The whole computation runs up front: each augmentation is reported as a
//! `path-found` step followed by an `augment` step, then one `min-cut` step
//! and a `complete` step close the sequence.

use super::{Algorithm, Run, ValidationError, ValidationResult};
use crate::graph::{FlowNetwork, Graph, NodeId};
use crate::step::{EdgeRef, FlowSegment, FlowStep, Step, StepSequence, VisualState};
use std::collections::VecDeque;
use tracing::trace;

/// Summary of a finished max-flow computation
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlowOutcome {
    /// Value of the maximum flow
    pub max_flow: f64,
    /// Nodes reachable from the source in the final residual graph
    pub source_side: Vec<NodeId>,
    /// Edges leaving the source side
    pub cut_edges: Vec<EdgeRef>,
    /// Sum of the capacities of `cut_edges`
    pub cut_capacity: f64,
    /// Number of augmenting paths used
    pub augmentations: usize,
}

// Parent pointer of the residual search: previous node index and whether
// the segment uses forward capacity.
type Parent = Option<(usize, bool)>;

/// Edmonds-Karp over a [`FlowNetwork`]
///
/// Residual amounts at or below `epsilon` count as zero. During the
/// residual search, forward capacity is preferred over cancelling flow when
/// both are available between the same pair of nodes.
pub struct EdmondsKarp {
    network: FlowNetwork,
    source: usize,
    sink: usize,
    epsilon: f64,
}

impl EdmondsKarp {
    /// Creates the solver; returns `None` if source or sink is not in the network
    pub fn new(network: FlowNetwork, source: NodeId, sink: NodeId, epsilon: f64) -> Option<Self> {
        let source = network.index_of(source)?;
        let sink = network.index_of(sink)?;
        Some(Self {
            network,
            source,
            sink,
            epsilon,
        })
    }

    /// Returns the network with its current flow
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    fn residual(&self, u: usize, v: usize, forward: bool) -> f64 {
        if forward {
            self.network.forward_residual(u, v)
        } else {
            self.network.flow_at(v, u)
        }
    }

    fn search(&self, stop_at_sink: bool) -> (Vec<Parent>, Vec<bool>) {
        let size = self.network.len();
        let mut parent: Vec<Parent> = vec![None; size];
        let mut reached = vec![false; size];
        let mut queue = VecDeque::new();

        reached[self.source] = true;
        queue.push_back(self.source);

        while let Some(u) = queue.pop_front() {
            for v in 0..size {
                if reached[v] {
                    continue;
                }
                let forward = if self.residual(u, v, true) > self.epsilon {
                    true
                } else if self.residual(u, v, false) > self.epsilon {
                    false
                } else {
                    continue;
                };
                reached[v] = true;
                parent[v] = Some((u, forward));
                if stop_at_sink && v == self.sink {
                    return (parent, reached);
                }
                queue.push_back(v);
            }
        }

        (parent, reached)
    }

    fn trace_path(&self, parent: &[Parent]) -> Vec<(usize, usize, bool)> {
        let mut segments = Vec::new();
        let mut v = self.sink;
        while v != self.source {
            let Some((u, forward)) = parent[v] else {
                break;
            };
            segments.push((u, v, forward));
            v = u;
        }
        segments.reverse();
        segments
    }

    /// Runs to completion, returning the steps and the result
    ///
    /// The network keeps the final flow afterwards.
    pub fn solve(&mut self) -> (Vec<Step>, MaxFlowOutcome) {
        let mut steps = Vec::new();
        let mut total = 0.0;
        let mut augmentations = 0;

        loop {
            let (parent, reached) = self.search(true);
            if !reached[self.sink] {
                break;
            }

            let segments = self.trace_path(&parent);
            let bottleneck = segments
                .iter()
                .map(|&(u, v, forward)| self.residual(u, v, forward))
                .fold(f64::INFINITY, f64::min);

            let mut path = vec![self.network.node_at(self.source)];
            path.extend(segments.iter().map(|&(_, v, _)| self.network.node_at(v)));
            let listed: Vec<String> = path.iter().map(ToString::to_string).collect();
            steps.push(Step::new(
                FlowStep::PathFound {
                    path: path.clone(),
                    bottleneck,
                },
                format!(
                    "Augmenting path {} with bottleneck {bottleneck}",
                    listed.join(" → ")
                ),
            ));

            for &(u, v, forward) in &segments {
                if forward {
                    self.network.add_flow(u, v, bottleneck);
                } else {
                    self.network.add_flow(v, u, -bottleneck);
                }
            }
            total += bottleneck;
            augmentations += 1;
            trace!(augmentations, bottleneck, total, "augmented");

            let cancelled = segments.iter().any(|&(_, _, forward)| !forward);
            let segments: Vec<FlowSegment> = segments
                .iter()
                .map(|&(u, v, forward)| FlowSegment {
                    from: self.network.node_at(u),
                    to: self.network.node_at(v),
                    forward,
                })
                .collect();
            let explanation = if cancelled {
                format!("Push {bottleneck} unit(s), cancelling some earlier flow; total flow is now {total}")
            } else {
                format!("Push {bottleneck} unit(s) along the path; total flow is now {total}")
            };
            steps.push(Step::new(
                FlowStep::Augmented {
                    segments,
                    bottleneck,
                    total_flow: total,
                },
                explanation,
            ));
        }

        let (_, reached) = self.search(false);
        let source_side: Vec<NodeId> = reached
            .iter()
            .enumerate()
            .filter(|(_, r)| **r)
            .map(|(i, _)| self.network.node_at(i))
            .collect();
        let cut_edges: Vec<EdgeRef> = self
            .network
            .edges()
            .iter()
            .filter(|e| {
                let side = |id| self.network.index_of(id).map_or(false, |i| reached[i]);
                side(e.a) && !side(e.b)
            })
            .map(|e| EdgeRef::new(e.a, e.b, e.weight))
            .collect();
        let cut_capacity: f64 = cut_edges.iter().map(|e| e.weight).sum();

        let listed: Vec<String> = cut_edges
            .iter()
            .map(|e| format!("{}→{}", e.from, e.to))
            .collect();
        steps.push(Step::new(
            FlowStep::MinCut {
                reachable: source_side.clone(),
                edges: cut_edges.clone(),
                capacity: cut_capacity,
            },
            if listed.is_empty() {
                "No edge leaves the source side: the minimum cut is empty".to_string()
            } else {
                format!(
                    "Minimum cut: {} with total capacity {cut_capacity}",
                    listed.join(", ")
                )
            },
        ));
        steps.push(Step::new(
            FlowStep::Complete { max_flow: total },
            format!("No augmenting path remains: maximum flow is {total}"),
        ));

        let outcome = MaxFlowOutcome {
            max_flow: total,
            source_side,
            cut_edges,
            cut_capacity,
            augmentations,
        };
        (steps, outcome)
    }
}

/// Computes the maximum flow from `source` to `sink` over the edges of `graph`
///
/// # Errors
///
/// Returns [`ValidationError::UnknownNode`] if either endpoint is not a node
/// of the graph.
pub fn max_flow(
    graph: &Graph,
    source: NodeId,
    sink: NodeId,
    epsilon: f64,
) -> ValidationResult<(Vec<Step>, MaxFlowOutcome)> {
    match EdmondsKarp::new(FlowNetwork::from_graph(graph), source, sink, epsilon) {
        Some(mut solver) => Ok(solver.solve()),
        None => {
            let node = if graph.contains_node(source) { sink } else { source };
            Err(ValidationError::UnknownNode { node })
        }
    }
}

pub(crate) fn start(graph: &Graph, source: NodeId, sink: NodeId, epsilon: f64) -> ValidationResult<Run> {
    let initial = VisualState::for_flow(graph.edges().iter().map(|e| (e.a, e.b)));
    let (steps, _) = max_flow(graph, source, sink, epsilon)?;
    Ok(Run::Precomputed(StepSequence::with_steps(Algorithm::MaxFlow, initial, steps)))
}
