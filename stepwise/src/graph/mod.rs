//! Graph model edited by collaborators and read by runners
//!
//! This module provides the topology every graph algorithm runs against:
//!
//! - Ordered node and edge storage with directed/weighted flags
//! - Normalized edge keys so an undirected edge exists at most once
//! - A dense capacity/flow view for max-flow runs
//! - DOT export for debugging
//!
//! # Design Principles
//!
//! This module hides the storage layout (maps, ordered lists, dense
//! matrices). Runners only see `neighbors`, `edges`, `index_map` and the
//! flow network accessors.

mod dot;
mod error;
mod flow_network;
mod model;
mod node_id;

pub use error::{GraphError, GraphResult};
pub use flow_network::FlowNetwork;
pub use model::{Edge, EdgeKey, Graph, NodeAttrs};
pub use node_id::NodeId;
