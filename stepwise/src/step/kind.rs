//! Step records, one closed enum per algorithm family.
//!
//! A [`Step`] is an immutable record of one algorithmic event. It carries
//! the node/edge/index references the event touched and the value needed to
//! update the aggregate it mutated, plus the explanation shown to the user.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// An edge as referenced from a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRef {
    /// Tail of the edge, in the direction the algorithm used it
    pub from: NodeId,
    /// Head of the edge, in the direction the algorithm used it
    pub to: NodeId,
    /// Weight or capacity
    pub weight: f64,
}

impl EdgeRef {
    /// Creates an edge reference
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// One segment of an augmenting path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSegment {
    /// Node the path leaves
    pub from: NodeId,
    /// Node the path enters
    pub to: NodeId,
    /// True when the segment uses spare capacity of `from -> to`; false when
    /// it cancels flow previously pushed along `to -> from`
    pub forward: bool,
}

/// BFS and DFS events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraversalStep {
    /// A node is dequeued (BFS) or entered (DFS)
    Visit {
        node: NodeId,
        parent: Option<NodeId>,
    },
    /// BFS sees a node for the first time along `from -> to`
    Discover { from: NodeId, to: NodeId },
    /// DFS looks along an edge
    ExploreEdge { from: NodeId, to: NodeId },
    /// DFS returns from `from` to its caller `to`
    Backtrack { from: NodeId, to: NodeId },
    /// DFS skips an edge into an already visited node
    EdgeReset { from: NodeId, to: NodeId },
    /// DFS has processed every neighbour of a node
    Finish { node: NodeId },
    /// Traversal is over
    Complete { visited: usize },
}

/// Dijkstra, Bellman-Ford and Floyd-Warshall events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathStep {
    /// A node's distance is final
    Settle {
        node: NodeId,
        #[serde(with = "crate::core::distance")]
        distance: f64,
    },
    /// A relaxation was attempted along `edge`
    Relax {
        edge: EdgeRef,
        #[serde(with = "crate::core::distance")]
        previous: f64,
        #[serde(with = "crate::core::distance")]
        candidate: f64,
        improved: bool,
    },
    /// A Bellman-Ford pass begins (1-based)
    Pass { pass: usize, total: usize },
    /// The check pass found an edge that can still be relaxed
    NegativeCycle { edge: EdgeRef },
    /// Bellman-Ford's final answer
    Verdict { negative_cycle: bool },
    /// Floyd-Warshall starts routing through `via`
    Intermediate { via: NodeId, k: usize },
    /// Floyd-Warshall improved `matrix[row][col]`
    MatrixUpdate {
        row: usize,
        col: usize,
        from: NodeId,
        to: NodeId,
        via: NodeId,
        #[serde(with = "crate::core::distance")]
        previous: f64,
        #[serde(with = "crate::core::distance")]
        distance: f64,
    },
    /// Shortest-path computation is over
    Complete,
}

/// Prim and Kruskal events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpanningStep {
    /// Prim seeds the tree with a node
    TreeStart { node: NodeId },
    /// An edge is examined
    Candidate { edge: EdgeRef },
    /// An edge joins the tree
    Accept { edge: EdgeRef, total_weight: f64 },
    /// An edge would close a cycle
    Reject { edge: EdgeRef },
    /// The tree spans every node
    Complete { total_weight: f64, edges: usize },
}

/// Edmonds-Karp events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowStep {
    /// The residual search reached the sink
    PathFound { path: Vec<NodeId>, bottleneck: f64 },
    /// Flow was pushed along the path
    Augmented {
        segments: Vec<FlowSegment>,
        bottleneck: f64,
        total_flow: f64,
    },
    /// The minimum cut separating source from sink
    MinCut {
        reachable: Vec<NodeId>,
        edges: Vec<EdgeRef>,
        capacity: f64,
    },
    /// No augmenting path remains
    Complete { max_flow: f64 },
}

/// Sorting and divide-and-conquer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortStep {
    /// A pass over the array begins (1-based)
    Pass { pass: usize, total: usize },
    /// Two positions are compared
    Compare { i: usize, j: usize },
    /// Two positions swap their values
    Swap { i: usize, j: usize },
    /// A value is written into a position
    Write { index: usize, value: u32 },
    /// Insertion sort lifts the value at `index` out of the array
    Key { index: usize, value: u32 },
    /// Insertion sort drops the held value into `index`
    Place { index: usize, value: u32 },
    /// Selection sort found a new minimum
    NewMinimum { index: usize },
    /// A position holds its final value
    Fixed { index: usize },
    /// Quicksort picks the pivot of `lo..=hi`
    Pivot { index: usize, lo: usize, hi: usize },
    /// Radix sort drops a value into the bucket of one digit
    Bucket {
        index: usize,
        value: u32,
        digit: usize,
        place: u32,
    },
    /// Radix sort reads the buckets back in order
    Collect { place: u32, array: Vec<u32> },
    /// Merge sort splits `lo..=hi` into a tree node
    Divide {
        node: usize,
        parent: Option<usize>,
        lo: usize,
        hi: usize,
        depth: usize,
    },
    /// Merge sort combines the sorted children of a tree node
    Merge {
        node: usize,
        lo: usize,
        hi: usize,
        merged: Vec<u32>,
    },
    /// The array is sorted
    Complete,
}

/// The family-tagged payload of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepKind {
    Traversal(TraversalStep),
    ShortestPath(PathStep),
    Spanning(SpanningStep),
    Flow(FlowStep),
    Sort(SortStep),
}

impl From<TraversalStep> for StepKind {
    fn from(step: TraversalStep) -> Self {
        StepKind::Traversal(step)
    }
}

impl From<PathStep> for StepKind {
    fn from(step: PathStep) -> Self {
        StepKind::ShortestPath(step)
    }
}

impl From<SpanningStep> for StepKind {
    fn from(step: SpanningStep) -> Self {
        StepKind::Spanning(step)
    }
}

impl From<FlowStep> for StepKind {
    fn from(step: FlowStep) -> Self {
        StepKind::Flow(step)
    }
}

impl From<SortStep> for StepKind {
    fn from(step: SortStep) -> Self {
        StepKind::Sort(step)
    }
}

/// One immutable algorithmic event and its explanation
///
/// # Example
///
/// ```
/// use stepwise::step::{SortStep, Step};
///
/// let step = Step::new(SortStep::Swap { i: 0, j: 1 }, "Swap positions 0 and 1");
/// assert_eq!(step.name(), "swap");
/// assert_eq!(step.explanation(), "Swap positions 0 and 1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    kind: StepKind,
    explanation: String,
}

impl Step {
    /// Creates a step from any family payload
    pub fn new(kind: impl Into<StepKind>, explanation: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            explanation: explanation.into(),
        }
    }

    /// Returns the payload
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Returns the text shown to the user for this step
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Returns true for the final step of a run
    pub fn is_complete(&self) -> bool {
        matches!(
            self.kind,
            StepKind::Traversal(TraversalStep::Complete { .. })
                | StepKind::ShortestPath(PathStep::Complete)
                | StepKind::ShortestPath(PathStep::Verdict { .. })
                | StepKind::Spanning(SpanningStep::Complete { .. })
                | StepKind::Flow(FlowStep::Complete { .. })
                | StepKind::Sort(SortStep::Complete)
        )
    }

    /// Returns the short discriminator of this step
    pub fn name(&self) -> &'static str {
        match &self.kind {
            StepKind::Traversal(step) => match step {
                TraversalStep::Visit { .. } => "visit",
                TraversalStep::Discover { .. } => "discover",
                TraversalStep::ExploreEdge { .. } => "explore-edge",
                TraversalStep::Backtrack { .. } => "backtrack",
                TraversalStep::EdgeReset { .. } => "edge-reset",
                TraversalStep::Finish { .. } => "finish",
                TraversalStep::Complete { .. } => "complete",
            },
            StepKind::ShortestPath(step) => match step {
                PathStep::Settle { .. } => "settle",
                PathStep::Relax { .. } => "relax",
                PathStep::Pass { .. } => "pass",
                PathStep::NegativeCycle { .. } => "negative-cycle",
                PathStep::Verdict { .. } => "verdict",
                PathStep::Intermediate { .. } => "intermediate",
                PathStep::MatrixUpdate { .. } => "matrix-update",
                PathStep::Complete => "complete",
            },
            StepKind::Spanning(step) => match step {
                SpanningStep::TreeStart { .. } => "tree-start",
                SpanningStep::Candidate { .. } => "candidate",
                SpanningStep::Accept { .. } => "accept",
                SpanningStep::Reject { .. } => "reject",
                SpanningStep::Complete { .. } => "complete",
            },
            StepKind::Flow(step) => match step {
                FlowStep::PathFound { .. } => "path-found",
                FlowStep::Augmented { .. } => "augment",
                FlowStep::MinCut { .. } => "min-cut",
                FlowStep::Complete { .. } => "complete",
            },
            StepKind::Sort(step) => match step {
                SortStep::Pass { .. } => "pass",
                SortStep::Compare { .. } => "compare",
                SortStep::Swap { .. } => "swap",
                SortStep::Write { .. } => "write",
                SortStep::Key { .. } => "key",
                SortStep::Place { .. } => "place",
                SortStep::NewMinimum { .. } => "new-minimum",
                SortStep::Fixed { .. } => "fixed",
                SortStep::Pivot { .. } => "pivot",
                SortStep::Bucket { .. } => "bucket",
                SortStep::Collect { .. } => "collect",
                SortStep::Divide { .. } => "divide",
                SortStep::Merge { .. } => "merge",
                SortStep::Complete => "complete",
            },
        }
    }
}

/// Formats a distance, printing unreachable as the infinity sign
pub fn format_distance(distance: f64) -> String {
    if distance.is_infinite() {
        if distance > 0.0 { "∞" } else { "-∞" }.to_string()
    } else {
        format!("{distance}")
    }
}
