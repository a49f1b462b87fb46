//! Stepwise: replayable algorithm execution for Rust
//!
//! `stepwise` runs graph, flow and sorting algorithms against a user-edited
//! topology and breaks each run into a finite sequence of [`Step`]s. A
//! front end plays those steps forward one tick at a time, pauses, changes
//! speed, or steps backward, and every state it shows is exactly the state
//! the algorithm was in.
//!
//! # Features
//!
//! - **Graph algorithms**: BFS, DFS, Dijkstra, Bellman-Ford, Floyd-Warshall,
//!   Prim, Kruskal
//! - **Max-flow**: Edmonds-Karp with the certifying minimum cut
//! - **Sorting**: bubble, insertion, selection, quicksort, radix, and a
//!   merge-sort recursion tree
//! - **Replay**: one step per tick, rewind by replay-from-start, seek
//! - **Validation**: every precondition failure has its own error with a
//!   cause and a remedy
//!
//! # Quick Start
//!
//! ```
//! use stepwise::prelude::*;
//!
//! let mut graph = Graph::new(false, true);
//! for id in 0..3 {
//!     graph.add_node(NodeId::new(id))?;
//! }
//! graph.add_edge(NodeId::new(0), NodeId::new(1), 4.0)?;
//! graph.add_edge(NodeId::new(1), NodeId::new(2), 1.0)?;
//! graph.add_edge(NodeId::new(0), NodeId::new(2), 10.0)?;
//!
//! let mut engine = Engine::new(graph, EngineConfig::default());
//! engine.select(Algorithm::Dijkstra);
//! engine.set_source(NodeId::new(0))?;
//! engine.start()?;
//!
//! while let Tick::Applied(step) = engine.tick() {
//!     println!("{}", step.explanation());
//! }
//! assert_eq!(engine.state().distances[&NodeId::new(2)], 5.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! Each module hides a decision that is likely to change:
//!
//! - [`core`]: configuration and serialization (hides the wire format)
//! - [`graph`]: topology (hides node and edge storage)
//! - [`step`]: step records and the visual state (hides how steps mutate state)
//! - [`runner`]: validation and graph algorithms (hides per-algorithm working data)
//! - [`sort`]: sorting generators (hides cursors and recursion trees)
//! - [`replay`]: the replay controller (hides the rewind strategy)
//! - [`engine`]: the per-graph facade (hides the edit lock)

pub mod core;
pub mod engine;
pub mod graph;
pub mod replay;
pub mod runner;
pub mod sort;
pub mod step;

// Re-export commonly used types for convenience
pub use crate::core::{
    deserialize_value, fingerprint, serialize_value, EngineConfig, Error as CoreError,
    Result as CoreResult,
};

pub use crate::engine::{Engine, EngineError, EngineResult};

pub use crate::graph::{Edge, EdgeKey, FlowNetwork, Graph, GraphError, GraphResult, NodeAttrs, NodeId};

pub use crate::replay::{ReplayController, ReplayError, ReplayResult, Tick};

#[cfg(feature = "clock")]
pub use crate::replay::{Playback, PlaybackEnd, Player, PlayerHandle};

pub use crate::runner::{
    run_to_completion, start, validate, Algorithm, Family, Run, RunContext, ValidationError,
    ValidationResult,
};

pub use crate::step::{Step, StepKind, StepSequence, VisualState};

// Re-export dependencies used in public API
pub use serde;
pub use uuid;

/// Prelude module for convenient glob imports
///
/// # Example
///
/// ```
/// use stepwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{EngineConfig, Error as CoreError, Result as CoreResult};

    pub use crate::engine::{Engine, EngineError, EngineResult};

    pub use crate::graph::{Graph, GraphError, GraphResult, NodeId};

    pub use crate::replay::{ReplayController, ReplayError, Tick};

    #[cfg(feature = "clock")]
    pub use crate::replay::Player;

    pub use crate::runner::{
        run_to_completion, Algorithm, Run, RunContext, ValidationError, ValidationResult,
    };

    pub use crate::step::{Step, StepKind, StepSequence, VisualState};

    // Re-export commonly used external types
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
