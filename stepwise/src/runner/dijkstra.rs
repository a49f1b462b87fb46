//! Dijkstra's algorithm, one settled node at a time.

use super::{Algorithm, LiveRun, Run};
use crate::graph::{Graph, NodeId};
use crate::step::{format_distance, EdgeRef, PathStep, Step, VisualState};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy)]
struct Entry {
    distance: f64,
    order: u64,
    node: NodeId,
}

// Reversed so that `BinaryHeap` pops the smallest distance; ties go to
// the entry pushed first.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Incremental Dijkstra from a single source
///
/// Each pop of the priority queue yields a `settle` step followed by one
/// `relax` step per edge to an unsettled neighbour, successful or not.
/// Stale queue entries are skipped silently.
pub struct Dijkstra {
    adjacency: HashMap<NodeId, Vec<(NodeId, f64)>>,
    distances: HashMap<NodeId, f64>,
    settled: HashSet<NodeId>,
    heap: BinaryHeap<Entry>,
    pushes: u64,
    pending: VecDeque<Step>,
    done: bool,
}

impl Dijkstra {
    /// Creates the search with every distance infinite except the source
    pub fn new(graph: &Graph, source: NodeId) -> Self {
        let distances = graph
            .node_ids()
            .map(|id| (id, if id == source { 0.0 } else { f64::INFINITY }))
            .collect();
        let mut search = Self {
            adjacency: graph.adjacency(),
            distances,
            settled: HashSet::new(),
            heap: BinaryHeap::new(),
            pushes: 0,
            pending: VecDeque::new(),
            done: false,
        };
        search.push(source, 0.0);
        search
    }

    fn push(&mut self, node: NodeId, distance: f64) {
        self.heap.push(Entry {
            distance,
            order: self.pushes,
            node,
        });
        self.pushes += 1;
    }

    fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    fn settle(&mut self, node: NodeId, distance: f64) {
        self.settled.insert(node);
        self.pending.push_back(Step::new(
            PathStep::Settle { node, distance },
            format!(
                "Settle node {node}: its shortest distance is {}",
                format_distance(distance)
            ),
        ));

        let neighbours = self.adjacency.get(&node).cloned().unwrap_or_default();
        for (next, weight) in neighbours {
            if self.settled.contains(&next) {
                continue;
            }
            let previous = self.distance(next);
            let candidate = distance + weight;
            let improved = candidate < previous;
            let explanation = if improved {
                self.distances.insert(next, candidate);
                self.push(next, candidate);
                format!(
                    "Relax {node}→{next}: {} + {weight} = {} beats {}",
                    format_distance(distance),
                    format_distance(candidate),
                    format_distance(previous)
                )
            } else {
                format!(
                    "Relax {node}→{next}: {} + {weight} = {} does not beat {}",
                    format_distance(distance),
                    format_distance(candidate),
                    format_distance(previous)
                )
            };
            self.pending.push_back(Step::new(
                PathStep::Relax {
                    edge: EdgeRef::new(node, next, weight),
                    previous,
                    candidate,
                    improved,
                },
                explanation,
            ));
        }
    }

    fn summary(&self) -> String {
        let mut parts: Vec<(NodeId, f64)> = self.distances.iter().map(|(k, v)| (*k, *v)).collect();
        parts.sort_by_key(|(id, _)| *id);
        let listed: Vec<String> = parts
            .iter()
            .map(|(id, d)| format!("{id}: {}", format_distance(*d)))
            .collect();
        format!("Dijkstra complete. Distances: {}", listed.join(", "))
    }
}

impl Iterator for Dijkstra {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }
            if self.done {
                return None;
            }
            match self.heap.pop() {
                Some(entry) => {
                    if self.settled.contains(&entry.node) || entry.distance > self.distance(entry.node) {
                        continue;
                    }
                    self.settle(entry.node, entry.distance);
                }
                None => {
                    self.done = true;
                    return Some(Step::new(PathStep::Complete, self.summary()));
                }
            }
        }
    }
}

pub(crate) fn start(graph: &Graph, source: NodeId) -> Run {
    Run::Live(LiveRun::new(
        Algorithm::Dijkstra,
        VisualState::for_distances(graph.node_ids(), source),
        Box::new(Dijkstra::new(graph, source)),
    ))
}
