//! Error types for graph editing
//!
//! Graph edits are made by collaborators between runs. Every rejected edit
//! is reported with one of these variants and leaves the graph unchanged.

use super::NodeId;
use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while editing a graph
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    /// A node was added with an identifier already in use
    #[error("Duplicate node: {node}")]
    DuplicateNode {
        /// The duplicate identifier
        node: NodeId,
    },

    /// A node was not found in the graph
    #[error("Node not found: {node}")]
    NodeNotFound {
        /// The identifier that was not found
        node: NodeId,
    },

    /// An edge names an endpoint that does not exist
    #[error("Edge {a}-{b} references missing node {missing}")]
    EndpointNotFound {
        /// First endpoint of the rejected edge
        a: NodeId,
        /// Second endpoint of the rejected edge
        b: NodeId,
        /// The endpoint that does not exist
        missing: NodeId,
    },

    /// An edge with the same normalized key already exists
    #[error("Edge {a}-{b} already exists")]
    DuplicateEdge {
        /// First endpoint
        a: NodeId,
        /// Second endpoint
        b: NodeId,
    },

    /// An edge was not found in the graph
    #[error("Edge {a}-{b} not found")]
    EdgeNotFound {
        /// First endpoint
        a: NodeId,
        /// Second endpoint
        b: NodeId,
    },

    /// An edge would connect a node to itself
    #[error("Node {node} cannot be connected to itself")]
    SelfLoop {
        /// The node at both ends
        node: NodeId,
    },

    /// A weight is NaN or infinite
    #[error("Edge weight must be a finite number, got {weight}")]
    InvalidWeight {
        /// The rejected weight
        weight: f64,
    },
}

impl GraphError {
    /// Creates a node not found error
    pub fn node_not_found(node: NodeId) -> Self {
        Self::NodeNotFound { node }
    }

    /// Creates a duplicate node error
    pub fn duplicate_node(node: NodeId) -> Self {
        Self::DuplicateNode { node }
    }

    /// Creates a duplicate edge error
    pub fn duplicate_edge(a: NodeId, b: NodeId) -> Self {
        Self::DuplicateEdge { a, b }
    }

    /// Creates an edge not found error
    pub fn edge_not_found(a: NodeId, b: NodeId) -> Self {
        Self::EdgeNotFound { a, b }
    }
}
