//! Precondition failures reported before a run starts
//!
//! Every violation has its own variant so that the rendering layer can
//! show the cause (`Display`) and a remedy ([`ValidationError::remedy`])
//! verbatim. The engine never starts a run that failed validation.

use super::Algorithm;
use crate::graph::NodeId;
use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A precondition an algorithm needs that the graph or input violates
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The graph has no nodes
    #[error("{algorithm} needs a graph with at least one node")]
    EmptyGraph { algorithm: Algorithm },

    /// No start node was chosen
    #[error("{algorithm} needs a source node")]
    MissingSource { algorithm: Algorithm },

    /// No sink node was chosen
    #[error("{algorithm} needs a sink node")]
    MissingSink { algorithm: Algorithm },

    /// A chosen node is not in the graph
    #[error("node {node} does not exist in the graph")]
    UnknownNode { node: NodeId },

    /// Source and sink are the same node
    #[error("source and sink are both node {node}")]
    SourceIsSink { node: NodeId },

    /// An edge has a negative weight
    #[error("{algorithm} requires non-negative weights, but edge {a}-{b} has weight {weight}")]
    NegativeWeight {
        algorithm: Algorithm,
        a: NodeId,
        b: NodeId,
        weight: f64,
    },

    /// An edge has a negative capacity
    #[error("edge {a}->{b} has negative capacity {capacity}")]
    NegativeCapacity { a: NodeId, b: NodeId, capacity: f64 },

    /// The graph is unweighted
    #[error("{algorithm} requires a weighted graph")]
    Unweighted { algorithm: Algorithm },

    /// The graph has no edges
    #[error("{algorithm} requires at least one edge")]
    NoEdges { algorithm: Algorithm },

    /// The graph has too few nodes
    #[error("{algorithm} requires at least {required} nodes, found {found}")]
    TooFewNodes {
        algorithm: Algorithm,
        required: usize,
        found: usize,
    },

    /// The graph is directed but the algorithm needs undirected edges
    #[error("{algorithm} requires an undirected graph")]
    Directed { algorithm: Algorithm },

    /// The graph is undirected but the algorithm needs directed edges
    #[error("{algorithm} requires a directed graph")]
    Undirected { algorithm: Algorithm },

    /// Some nodes cannot be reached from the others
    #[error("{algorithm} requires a connected graph, but {unreached} node(s) are unreachable")]
    Disconnected {
        algorithm: Algorithm,
        unreached: usize,
    },

    /// There is nothing to sort
    #[error("{algorithm} needs at least one value")]
    EmptyArray { algorithm: Algorithm },

    /// The array exceeds the configured size cap
    #[error("{len} values exceed the limit of {max}")]
    ArrayTooLarge { len: usize, max: usize },

    /// A value exceeds the configured maximum
    #[error("value {value} at position {index} exceeds the maximum of {max}")]
    ValueOutOfRange { index: usize, value: u32, max: u32 },

    /// A graph input (source or sink) was given to a sorting algorithm
    #[error("{algorithm} sorts an array and does not use graph nodes")]
    NotAGraphAlgorithm { algorithm: Algorithm },

    /// An array was given to a graph algorithm
    #[error("{algorithm} runs on the graph and does not sort an array")]
    NotASortAlgorithm { algorithm: Algorithm },
}

impl ValidationError {
    /// Returns what the user can do to fix the problem
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::EmptyGraph { .. } => "Add at least one node before starting.",
            Self::MissingSource { .. } => "Select a source node.",
            Self::MissingSink { .. } => "Select a sink node.",
            Self::UnknownNode { .. } => "Select a node that is part of the graph.",
            Self::SourceIsSink { .. } => "Choose a sink different from the source.",
            Self::NegativeWeight { .. } => {
                "Make every weight non-negative, or use Bellman-Ford instead."
            }
            Self::NegativeCapacity { .. } => "Capacities must be zero or positive.",
            Self::Unweighted { .. } => "Recreate the graph as a weighted graph.",
            Self::NoEdges { .. } => "Add at least one edge.",
            Self::TooFewNodes { .. } => "Add more nodes.",
            Self::Directed { .. } => "Recreate the graph as an undirected graph.",
            Self::Undirected { .. } => "Recreate the graph as a directed graph.",
            Self::Disconnected { .. } => "Add edges so every node is connected.",
            Self::EmptyArray { .. } => "Add at least one value.",
            Self::ArrayTooLarge { .. } => "Remove values until the array fits the limit.",
            Self::ValueOutOfRange { .. } => "Lower the value to within the allowed maximum.",
            Self::NotAGraphAlgorithm { .. } => "Enter an array of values instead.",
            Self::NotASortAlgorithm { .. } => "Select nodes on the graph instead.",
        }
    }
}
