//! One graph, one armed algorithm, one replay controller.
//!
//! [`Engine`] is the per-graph facade a front end talks to. It routes graph
//! edits through a lock: while an algorithm is selected or a run is loaded,
//! structural edits are refused so the steps being replayed always describe
//! the graph on screen.

use crate::core::EngineConfig;
use crate::graph::{Edge, Graph, GraphError, NodeAttrs, NodeId};
use crate::replay::{ReplayController, ReplayError, Tick};
use crate::runner::{self, Algorithm, RunContext, ValidationError};
use crate::step::VisualState;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by [`Engine`]
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// A structural edit was attempted while an algorithm holds the graph
    #[error("the graph cannot be edited while {algorithm} is selected or running")]
    GraphLocked { algorithm: Algorithm },

    /// An operation needs a selected algorithm
    #[error("no algorithm is selected")]
    NothingArmed,
}

/// Per-graph engine instance
///
/// # Example
///
/// ```
/// use stepwise::runner::Algorithm;
/// use stepwise::{Engine, EngineConfig, EngineError, Graph, NodeId, Tick};
///
/// let mut engine = Engine::new(Graph::new(false, true), EngineConfig::default());
/// engine.add_node(NodeId::new(0))?;
/// engine.add_node(NodeId::new(1))?;
/// engine.add_edge(NodeId::new(0), NodeId::new(1), 3.0)?;
///
/// engine.select(Algorithm::Dijkstra);
/// engine.set_source(NodeId::new(0))?;
/// assert!(matches!(engine.add_node(NodeId::new(2)), Err(EngineError::GraphLocked { .. })));
///
/// engine.start()?;
/// while engine.tick() != Tick::Finished {}
/// assert_eq!(engine.state().distances[&NodeId::new(1)], 3.0);
///
/// engine.cancel();
/// engine.add_node(NodeId::new(2))?;
/// # Ok::<(), EngineError>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    graph: Graph,
    config: EngineConfig,
    armed: Option<Algorithm>,
    context: RunContext,
    controller: ReplayController,
}

impl Engine {
    /// Creates an engine around `graph`
    pub fn new(graph: Graph, config: EngineConfig) -> Self {
        let controller = ReplayController::new(&config);
        Self {
            graph,
            config,
            armed: None,
            context: RunContext::default(),
            controller,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the selected algorithm
    pub fn armed(&self) -> Option<Algorithm> {
        self.armed
    }

    /// Returns the inputs chosen so far
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Returns true if structural graph edits are currently refused
    pub fn is_locked(&self) -> bool {
        self.holder().is_some()
    }

    fn holder(&self) -> Option<Algorithm> {
        self.armed.or_else(|| self.controller.algorithm())
    }

    fn ensure_unlocked(&self) -> EngineResult<()> {
        match self.holder() {
            Some(algorithm) => {
                debug!(%algorithm, "graph edit refused");
                Err(EngineError::GraphLocked { algorithm })
            }
            None => Ok(()),
        }
    }

    pub fn add_node(&mut self, id: NodeId) -> EngineResult<()> {
        self.ensure_unlocked()?;
        Ok(self.graph.add_node(id)?)
    }

    pub fn add_node_with_label(&mut self, id: NodeId, label: impl Into<String>) -> EngineResult<()> {
        self.ensure_unlocked()?;
        Ok(self.graph.add_node_with_label(id, label)?)
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> EngineResult<()> {
        self.ensure_unlocked()?;
        Ok(self.graph.add_edge(a, b, weight)?)
    }

    pub fn remove_node(&mut self, id: NodeId) -> EngineResult<NodeAttrs> {
        self.ensure_unlocked()?;
        Ok(self.graph.remove_node(id)?)
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> EngineResult<Edge> {
        self.ensure_unlocked()?;
        Ok(self.graph.remove_edge(a, b)?)
    }

    /// Arms `algorithm` and locks the graph
    ///
    /// Any loaded run and previously chosen inputs are discarded.
    pub fn select(&mut self, algorithm: Algorithm) {
        info!(%algorithm, "algorithm selected");
        self.controller.reset();
        self.context = RunContext::default();
        self.armed = Some(algorithm);
    }

    fn armed_graph_algorithm(&self) -> EngineResult<Algorithm> {
        let algorithm = self.armed.ok_or(EngineError::NothingArmed)?;
        if algorithm.is_sort() {
            return Err(ValidationError::NotAGraphAlgorithm { algorithm }.into());
        }
        Ok(algorithm)
    }

    fn require_node(&self, node: NodeId) -> EngineResult<()> {
        if self.graph.contains_node(node) {
            Ok(())
        } else {
            Err(ValidationError::UnknownNode { node }.into())
        }
    }

    /// Chooses the source (or Prim start) node
    pub fn set_source(&mut self, node: NodeId) -> EngineResult<()> {
        self.armed_graph_algorithm()?;
        self.require_node(node)?;
        self.context.source = Some(node);
        Ok(())
    }

    /// Chooses the max-flow sink
    pub fn set_sink(&mut self, node: NodeId) -> EngineResult<()> {
        self.armed_graph_algorithm()?;
        self.require_node(node)?;
        self.context.sink = Some(node);
        Ok(())
    }

    /// Chooses the array to sort
    pub fn set_array(&mut self, values: Vec<u32>) -> EngineResult<()> {
        let algorithm = self.armed.ok_or(EngineError::NothingArmed)?;
        if !algorithm.is_sort() {
            return Err(ValidationError::NotASortAlgorithm { algorithm }.into());
        }
        self.context.array = values;
        Ok(())
    }

    /// Checks the armed algorithm's preconditions without starting it
    pub fn validate(&self) -> EngineResult<()> {
        let algorithm = self.armed.ok_or(EngineError::NothingArmed)?;
        Ok(runner::validate(
            algorithm,
            &self.graph,
            &self.context,
            &self.config,
        )?)
    }

    /// Validates and loads a run of the armed algorithm
    ///
    /// The graph stays locked until [`cancel`](Self::cancel) or
    /// [`reset`](Self::reset).
    pub fn start(&mut self) -> EngineResult<()> {
        let algorithm = self.armed.ok_or(EngineError::NothingArmed)?;
        let run = runner::start(algorithm, &self.graph, &self.context, &self.config)?;
        self.controller.start_run(run);
        Ok(())
    }

    /// Discards the run and the selection, unlocking the graph
    pub fn cancel(&mut self) {
        if let Some(algorithm) = self.holder() {
            info!(%algorithm, "run cancelled");
        }
        self.controller.reset();
        self.context = RunContext::default();
        self.armed = None;
    }

    /// Returns to the pre-run graph
    ///
    /// The run, the selection and the inputs are discarded; the topology the
    /// user built is kept.
    pub fn reset(&mut self) {
        self.cancel();
        debug!(nodes = self.graph.len(), "engine reset");
    }

    /// Discards any run, then removes every node and edge
    pub fn clear_graph(&mut self) {
        self.cancel();
        self.graph.clear();
    }

    pub fn tick(&mut self) -> Tick {
        self.controller.tick()
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn set_speed(&mut self, speed: f64) -> EngineResult<()> {
        Ok(self.controller.set_speed(speed)?)
    }

    pub fn next_delay(&self) -> Duration {
        self.controller.next_delay()
    }

    pub fn previous_step(&mut self) -> bool {
        self.controller.previous_step()
    }

    pub fn seek(&mut self, index: usize) -> EngineResult<()> {
        Ok(self.controller.seek(index)?)
    }

    pub fn state(&self) -> &VisualState {
        self.controller.state()
    }

    /// Returns the replay controller for read-only projections
    pub fn controller(&self) -> &ReplayController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn engine() -> Engine {
        let mut engine = Engine::new(Graph::new(true, true), EngineConfig::default());
        for id in 0..3 {
            engine.add_node(n(id)).unwrap();
        }
        engine.add_edge(n(0), n(1), 10.0).unwrap();
        engine.add_edge(n(1), n(2), 5.0).unwrap();
        engine.add_edge(n(0), n(2), 3.0).unwrap();
        engine
    }

    #[test]
    fn test_selection_locks_graph() {
        let mut engine = engine();
        engine.select(Algorithm::MaxFlow);
        assert!(engine.is_locked());
        assert_eq!(
            engine.remove_node(n(0)),
            Err(EngineError::GraphLocked {
                algorithm: Algorithm::MaxFlow
            })
        );

        engine.cancel();
        assert!(!engine.is_locked());
        assert!(engine.remove_edge(n(0), n(2)).is_ok());
    }

    #[test]
    fn test_start_requires_selection() {
        let mut engine = engine();
        assert_eq!(engine.start(), Err(EngineError::NothingArmed));
        assert_eq!(engine.set_source(n(0)), Err(EngineError::NothingArmed));
    }

    #[test]
    fn test_inputs_must_match_algorithm() {
        let mut engine = engine();
        engine.select(Algorithm::QuickSort);
        assert!(matches!(
            engine.set_source(n(0)),
            Err(EngineError::Validation(ValidationError::NotAGraphAlgorithm { .. }))
        ));

        engine.select(Algorithm::Bfs);
        assert!(matches!(
            engine.set_array(vec![1]),
            Err(EngineError::Validation(ValidationError::NotASortAlgorithm { .. }))
        ));
        assert!(matches!(
            engine.set_source(n(9)),
            Err(EngineError::Validation(ValidationError::UnknownNode { .. }))
        ));
    }

    #[test]
    fn test_max_flow_through_engine() {
        let mut engine = engine();
        engine.select(Algorithm::MaxFlow);
        engine.set_source(n(0)).unwrap();
        assert!(matches!(
            engine.start(),
            Err(EngineError::Validation(ValidationError::MissingSink { .. }))
        ));

        engine.set_sink(n(2)).unwrap();
        engine.start().unwrap();
        while engine.tick() != Tick::Finished {}
        assert_eq!(engine.state().total_flow, 8.0);
        assert!(engine.state().complete);
    }

    #[test]
    fn test_reset_keeps_graph() {
        let mut engine = engine();
        engine.select(Algorithm::Bfs);
        engine.set_source(n(0)).unwrap();
        engine.start().unwrap();
        assert!(matches!(engine.tick(), Tick::Applied(_)));

        engine.reset();
        assert_eq!(engine.graph().len(), 3);
        assert_eq!(engine.graph().edge_count(), 3);
        assert_eq!(engine.armed(), None);
        assert!(!engine.is_locked());
        assert!(!engine.controller().is_loaded());
        assert_eq!(engine.tick(), Tick::Idle);
    }

    #[test]
    fn test_clear_graph() {
        let mut engine = engine();
        engine.select(Algorithm::Bfs);
        engine.clear_graph();
        assert!(engine.graph().is_empty());
        assert_eq!(engine.armed(), None);
    }

    #[test]
    fn test_invalid_speed_is_reported() {
        let mut engine = engine();
        assert!(matches!(
            engine.set_speed(0.0),
            Err(EngineError::Replay(ReplayError::InvalidSpeed { .. }))
        ));
    }
}
