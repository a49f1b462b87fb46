//! The visualization state a renderer reads after every tick.
//!
//! [`VisualState::apply`] is the only code path that mutates this state.
//! Applying the same steps, in the same order, to the same initial state
//! always produces the same result, which is what makes rewinding by
//! replay-from-start correct.

use super::kind::{EdgeRef, FlowStep, PathStep, SortStep, SpanningStep, Step, StepKind, TraversalStep};
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number of radix buckets (decimal digits)
pub const RADIX: usize = 10;

/// One node of the merge-sort recursion tree as currently shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubarrayView {
    /// First index covered
    pub lo: usize,
    /// Last index covered (inclusive)
    pub hi: usize,
    /// Distance from the root
    pub depth: usize,
    /// Parent tree node, `None` for the root
    pub parent: Option<usize>,
    /// Values of the subarray
    pub values: Vec<u32>,
    /// True once the values are in sorted order
    pub sorted: bool,
}

/// Everything a renderer needs to draw the current step
///
/// Fields irrelevant to the running algorithm stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// Node the algorithm is working on
    pub current: Option<NodeId>,
    /// Visited (BFS/DFS), settled (Dijkstra) or in-tree (Prim/Kruskal) nodes
    pub visited: BTreeSet<NodeId>,
    /// Discovered but not yet visited nodes (BFS)
    pub frontier: BTreeSet<NodeId>,
    /// Nodes whose neighbours have all been processed (DFS)
    pub finished: BTreeSet<NodeId>,
    /// Edge touched by the latest step
    pub highlighted_edge: Option<(NodeId, NodeId)>,
    /// Tree edges of the traversal, in discovery order
    pub traversal_edges: Vec<(NodeId, NodeId)>,

    /// Tentative or final distance from the source
    #[serde(with = "crate::core::distance::map")]
    pub distances: BTreeMap<NodeId, f64>,
    /// Row/column order of the all-pairs matrix
    pub matrix_nodes: Vec<NodeId>,
    /// All-pairs distance matrix (Floyd-Warshall)
    #[serde(with = "crate::core::distance::matrix")]
    pub matrix: Vec<Vec<f64>>,
    /// Intermediate node currently allowed (Floyd-Warshall)
    pub via: Option<NodeId>,
    /// Current Bellman-Ford or bubble sort pass
    pub pass: Option<usize>,
    /// Bellman-Ford verdict once known
    pub negative_cycle: Option<bool>,

    /// Edges accepted into the spanning tree
    pub tree_edges: Vec<EdgeRef>,
    /// Edges rejected because they would close a cycle
    pub rejected_edges: Vec<EdgeRef>,
    /// Weight of the spanning tree so far
    pub total_weight: f64,

    /// Flow label of every edge, `flow[from][to]`
    pub flow: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    /// Value of the flow so far
    pub total_flow: f64,
    /// Latest augmenting path
    pub augmenting_path: Vec<NodeId>,
    /// Nodes on the source side of the minimum cut
    pub source_side: BTreeSet<NodeId>,
    /// Edges of the minimum cut
    pub cut_edges: Vec<EdgeRef>,

    /// Array being sorted
    pub array: Vec<u32>,
    /// Positions compared or swapped by the latest step
    pub compared: Option<(usize, usize)>,
    /// Position the latest step focused on
    pub focus: Option<usize>,
    /// Quicksort pivot position
    pub pivot: Option<usize>,
    /// Subrange currently being worked on
    pub active_range: Option<(usize, usize)>,
    /// Selection sort minimum so far
    pub minimum: Option<usize>,
    /// Value insertion sort is holding and the slot it came from
    pub held: Option<(usize, u32)>,
    /// Positions known to hold their final value
    pub sorted: BTreeSet<usize>,
    /// Radix buckets, one per digit
    pub buckets: Vec<Vec<u32>>,
    /// Merge-sort recursion tree, keyed by arena index
    pub tree: BTreeMap<usize, SubarrayView>,

    /// Explanation of the latest step
    pub explanation: String,
    /// True once the run's final step has been applied
    pub complete: bool,
}

impl VisualState {
    /// Initial state for a traversal from `source`
    pub fn for_traversal(source: NodeId) -> Self {
        Self {
            current: Some(source),
            ..Self::default()
        }
    }

    /// Initial state for single-source shortest paths
    ///
    /// The source starts at 0, every other node at infinity.
    pub fn for_distances(nodes: impl IntoIterator<Item = NodeId>, source: NodeId) -> Self {
        let distances = nodes
            .into_iter()
            .map(|id| (id, if id == source { 0.0 } else { f64::INFINITY }))
            .collect();
        Self {
            current: Some(source),
            distances,
            ..Self::default()
        }
    }

    /// Initial state for the all-pairs matrix
    pub fn for_matrix(nodes: Vec<NodeId>, matrix: Vec<Vec<f64>>) -> Self {
        Self {
            matrix_nodes: nodes,
            matrix,
            ..Self::default()
        }
    }

    /// Initial state for a spanning tree
    pub fn for_spanning_tree() -> Self {
        Self::default()
    }

    /// Initial state for max-flow: every edge labelled with zero flow
    pub fn for_flow(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut flow: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
        for (a, b) in edges {
            flow.entry(a).or_default().insert(b, 0.0);
        }
        Self {
            flow,
            ..Self::default()
        }
    }

    /// Initial state for sorting `values`
    pub fn for_array(values: Vec<u32>) -> Self {
        Self {
            array: values,
            ..Self::default()
        }
    }

    /// Returns the flow currently on `from -> to`
    pub fn flow_on(&self, from: NodeId, to: NodeId) -> f64 {
        self.flow
            .get(&from)
            .and_then(|row| row.get(&to))
            .copied()
            .unwrap_or(0.0)
    }

    /// Applies one step
    pub fn apply(&mut self, step: &Step) {
        self.highlighted_edge = None;
        self.compared = None;
        self.focus = None;
        self.explanation = step.explanation().to_string();

        match step.kind() {
            StepKind::Traversal(step) => self.apply_traversal(step),
            StepKind::ShortestPath(step) => self.apply_path(step),
            StepKind::Spanning(step) => self.apply_spanning(step),
            StepKind::Flow(step) => self.apply_flow(step),
            StepKind::Sort(step) => self.apply_sort(step),
        }
    }

    fn apply_traversal(&mut self, step: &TraversalStep) {
        match *step {
            TraversalStep::Visit { node, parent } => {
                self.current = Some(node);
                self.visited.insert(node);
                self.frontier.remove(&node);
                if let Some(parent) = parent {
                    self.highlighted_edge = Some((parent, node));
                    self.traversal_edges.push((parent, node));
                }
            }
            TraversalStep::Discover { from, to } => {
                self.frontier.insert(to);
                self.highlighted_edge = Some((from, to));
            }
            TraversalStep::ExploreEdge { from, to } | TraversalStep::EdgeReset { from, to } => {
                self.current = Some(from);
                self.highlighted_edge = Some((from, to));
            }
            TraversalStep::Backtrack { from, to } => {
                self.current = Some(to);
                self.highlighted_edge = Some((to, from));
            }
            TraversalStep::Finish { node } => {
                self.finished.insert(node);
            }
            TraversalStep::Complete { .. } => {
                self.current = None;
                self.complete = true;
            }
        }
    }

    fn apply_path(&mut self, step: &PathStep) {
        match step {
            PathStep::Settle { node, distance } => {
                self.current = Some(*node);
                self.visited.insert(*node);
                self.distances.insert(*node, *distance);
            }
            PathStep::Relax {
                edge,
                candidate,
                improved,
                ..
            } => {
                self.current = Some(edge.from);
                self.highlighted_edge = Some((edge.from, edge.to));
                if *improved {
                    self.distances.insert(edge.to, *candidate);
                }
            }
            PathStep::Pass { pass, .. } => {
                self.pass = Some(*pass);
            }
            PathStep::NegativeCycle { edge } => {
                self.highlighted_edge = Some((edge.from, edge.to));
                self.negative_cycle = Some(true);
            }
            PathStep::Verdict { negative_cycle } => {
                self.negative_cycle = Some(*negative_cycle);
                self.current = None;
                self.complete = true;
            }
            PathStep::Intermediate { via, .. } => {
                self.via = Some(*via);
            }
            PathStep::MatrixUpdate {
                row,
                col,
                from,
                to,
                distance,
                ..
            } => {
                if let Some(cell) = self.matrix.get_mut(*row).and_then(|r| r.get_mut(*col)) {
                    *cell = *distance;
                }
                self.highlighted_edge = Some((*from, *to));
            }
            PathStep::Complete => {
                self.current = None;
                self.via = None;
                self.complete = true;
            }
        }
    }

    fn apply_spanning(&mut self, step: &SpanningStep) {
        match step {
            SpanningStep::TreeStart { node } => {
                self.current = Some(*node);
                self.visited.insert(*node);
            }
            SpanningStep::Candidate { edge } => {
                self.highlighted_edge = Some((edge.from, edge.to));
            }
            SpanningStep::Accept { edge, total_weight } => {
                self.highlighted_edge = Some((edge.from, edge.to));
                self.visited.insert(edge.from);
                self.visited.insert(edge.to);
                self.current = Some(edge.to);
                self.tree_edges.push(*edge);
                self.total_weight = *total_weight;
            }
            SpanningStep::Reject { edge } => {
                self.highlighted_edge = Some((edge.from, edge.to));
                self.rejected_edges.push(*edge);
            }
            SpanningStep::Complete { total_weight, .. } => {
                self.total_weight = *total_weight;
                self.current = None;
                self.complete = true;
            }
        }
    }

    fn apply_flow(&mut self, step: &FlowStep) {
        match step {
            FlowStep::PathFound { path, .. } => {
                self.augmenting_path = path.clone();
            }
            FlowStep::Augmented {
                segments,
                bottleneck,
                total_flow,
            } => {
                for segment in segments {
                    if segment.forward {
                        *self
                            .flow
                            .entry(segment.from)
                            .or_default()
                            .entry(segment.to)
                            .or_insert(0.0) += bottleneck;
                    } else {
                        *self
                            .flow
                            .entry(segment.to)
                            .or_default()
                            .entry(segment.from)
                            .or_insert(0.0) -= bottleneck;
                    }
                }
                self.total_flow = *total_flow;
            }
            FlowStep::MinCut {
                reachable, edges, ..
            } => {
                self.augmenting_path.clear();
                self.source_side = reachable.iter().copied().collect();
                self.cut_edges = edges.clone();
            }
            FlowStep::Complete { max_flow } => {
                self.total_flow = *max_flow;
                self.complete = true;
            }
        }
    }

    fn apply_sort(&mut self, step: &SortStep) {
        match step {
            SortStep::Pass { pass, .. } => {
                self.pass = Some(*pass);
            }
            SortStep::Compare { i, j } => {
                self.compared = Some((*i, *j));
            }
            SortStep::Swap { i, j } => {
                if *i < self.array.len() && *j < self.array.len() {
                    self.array.swap(*i, *j);
                }
                self.compared = Some((*i, *j));
            }
            SortStep::Write { index, value } => {
                if let Some(slot) = self.array.get_mut(*index) {
                    *slot = *value;
                }
                self.focus = Some(*index);
            }
            SortStep::Key { index, value } => {
                self.held = Some((*index, *value));
                self.focus = Some(*index);
            }
            SortStep::Place { index, value } => {
                if let Some(slot) = self.array.get_mut(*index) {
                    *slot = *value;
                }
                self.held = None;
                self.focus = Some(*index);
            }
            SortStep::NewMinimum { index } => {
                self.minimum = Some(*index);
            }
            SortStep::Fixed { index } => {
                self.sorted.insert(*index);
                self.focus = Some(*index);
                self.pivot = None;
                self.minimum = None;
            }
            SortStep::Pivot { index, lo, hi } => {
                self.pivot = Some(*index);
                self.active_range = Some((*lo, *hi));
            }
            SortStep::Bucket {
                index,
                value,
                digit,
                ..
            } => {
                if self.buckets.len() < RADIX {
                    self.buckets.resize(RADIX, Vec::new());
                }
                if let Some(bucket) = self.buckets.get_mut(*digit) {
                    bucket.push(*value);
                }
                self.focus = Some(*index);
            }
            SortStep::Collect { array, .. } => {
                self.array = array.clone();
                self.buckets.iter_mut().for_each(Vec::clear);
            }
            SortStep::Divide {
                node,
                parent,
                lo,
                hi,
                depth,
            } => {
                let values = self
                    .array
                    .get(*lo..=*hi)
                    .map(<[u32]>::to_vec)
                    .unwrap_or_default();
                self.tree.insert(
                    *node,
                    SubarrayView {
                        lo: *lo,
                        hi: *hi,
                        depth: *depth,
                        parent: *parent,
                        values,
                        sorted: lo == hi,
                    },
                );
                self.active_range = Some((*lo, *hi));
            }
            SortStep::Merge {
                node,
                lo,
                hi,
                merged,
            } => {
                if let Some(slot) = self.array.get_mut(*lo..*lo + merged.len()) {
                    slot.copy_from_slice(merged);
                }
                if let Some(view) = self.tree.get_mut(node) {
                    view.values = merged.clone();
                    view.sorted = true;
                }
                self.active_range = Some((*lo, *hi));
            }
            SortStep::Complete => {
                self.sorted = (0..self.array.len()).collect();
                self.pivot = None;
                self.minimum = None;
                self.held = None;
                self.active_range = None;
                self.complete = true;
            }
        }
    }
}
