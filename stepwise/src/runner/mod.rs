//! Algorithm runners: validation, then step generation
//!
//! Each graph algorithm lives in its own module and is either:
//!
//! - **Incremental**: an `Iterator<Item = Step>` that does one unit of work
//!   per call (BFS, Dijkstra, Bellman-Ford, Floyd-Warshall, Prim, Kruskal)
//! - **Precomputed**: a function that returns every step up front (DFS,
//!   Edmonds-Karp)
//!
//! [`start`] validates the request and hands back a [`Run`], which the
//! replay controller consumes without caring which kind it got. Sorting
//! runners live in [`crate::sort`] and are dispatched from here too.
//!
//! # Design Principles
//!
//! This module hides how each algorithm keeps its working data (queues,
//! heaps, matrices, union-find). Runners read the graph once when they are
//! created and never touch it again.

mod algorithm;
mod error;
mod run;
mod validate;

pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod kruskal;
pub mod max_flow;
pub mod prim;
pub mod union_find;

pub use algorithm::{Algorithm, Family};
pub use error::{ValidationError, ValidationResult};
pub use run::{LiveRun, Run, StepStream};
pub use validate::validate;

use crate::core::EngineConfig;
use crate::graph::{Graph, NodeId};
use crate::step::StepSequence;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

/// Inputs chosen by the user for one run
///
/// Graph algorithms read `source`/`sink`; sorting algorithms read `array`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Start node, required by BFS, DFS, Dijkstra, Bellman-Ford and max-flow
    pub source: Option<NodeId>,
    /// Sink node, required by max-flow
    pub sink: Option<NodeId>,
    /// Array to sort
    pub array: Vec<u32>,
}

impl RunContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with only a source node
    pub fn from_source(source: NodeId) -> Self {
        Self::new().with_source(source)
    }

    /// Creates a context for a max-flow run
    pub fn flow(source: NodeId, sink: NodeId) -> Self {
        Self::new().with_source(source).with_sink(sink)
    }

    /// Sets the source node
    pub fn with_source(mut self, source: NodeId) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the sink node
    pub fn with_sink(mut self, sink: NodeId) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the array to sort
    pub fn with_array(mut self, array: Vec<u32>) -> Self {
        self.array = array;
        self
    }
}

/// Validates and starts a run
///
/// Nothing is generated if validation fails. Precomputed algorithms have
/// every step ready on return; incremental ones have none yet.
///
/// # Example
///
/// ```
/// use stepwise::runner::{start, Algorithm, RunContext};
/// use stepwise::{EngineConfig, Graph, NodeId};
///
/// let mut graph = Graph::new(false, false);
/// graph.add_node(NodeId::new(0)).unwrap();
/// graph.add_node(NodeId::new(1)).unwrap();
/// graph.add_edge(NodeId::new(0), NodeId::new(1), 1.0).unwrap();
///
/// let context = RunContext::from_source(NodeId::new(0));
/// let run = start(Algorithm::Bfs, &graph, &context, &EngineConfig::default()).unwrap();
/// let sequence = run.into_sequence();
/// assert_eq!(sequence.final_state().visited.len(), 2);
/// ```
pub fn start(
    algorithm: Algorithm,
    graph: &Graph,
    context: &RunContext,
    config: &EngineConfig,
) -> ValidationResult<Run> {
    let span = debug_span!("run", %algorithm);
    let _guard = span.enter();

    if let Err(error) = validate(algorithm, graph, context, config) {
        debug!(%error, "validation failed");
        return Err(error);
    }

    let source = || context.source.ok_or(ValidationError::MissingSource { algorithm });
    let run = match algorithm {
        Algorithm::Bfs => bfs::start(graph, source()?),
        Algorithm::Dfs => dfs::start(graph, source()?),
        Algorithm::Dijkstra => dijkstra::start(graph, source()?),
        Algorithm::BellmanFord => bellman_ford::start(graph, source()?),
        Algorithm::FloydWarshall => floyd_warshall::start(graph),
        Algorithm::Prim => {
            let first = context
                .source
                .or_else(|| graph.node_ids().next())
                .ok_or(ValidationError::EmptyGraph { algorithm })?;
            prim::start(graph, first)
        }
        Algorithm::Kruskal => kruskal::start(graph),
        Algorithm::MaxFlow => {
            let sink = context.sink.ok_or(ValidationError::MissingSink { algorithm })?;
            max_flow::start(graph, source()?, sink, config.flow_epsilon)?
        }
        Algorithm::BubbleSort
        | Algorithm::InsertionSort
        | Algorithm::SelectionSort
        | Algorithm::QuickSort
        | Algorithm::RadixSort
        | Algorithm::MergeSort => crate::sort::start(algorithm, &context.array),
    };

    match &run {
        Run::Precomputed(sequence) => info!(
            run_id = %sequence.run_id(),
            steps = sequence.len(),
            "precomputed run ready"
        ),
        Run::Live(live) => info!(run_id = %live.recorded().run_id(), "incremental run started"),
    }
    Ok(run)
}

/// Validates, starts and drains a run into its full step sequence
pub fn run_to_completion(
    algorithm: Algorithm,
    graph: &Graph,
    context: &RunContext,
    config: &EngineConfig,
) -> ValidationResult<StepSequence> {
    start(algorithm, graph, context, config).map(Run::into_sequence)
}
