//! Node identifier type
//!
//! Nodes are identified by a small integer chosen by whoever edits the
//! graph. Identifiers are ordered, which DFS relies on to visit neighbours
//! in a stable order that does not depend on how the edges were inserted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node within a graph
///
/// # Examples
///
/// ```
/// use stepwise::NodeId;
///
/// let node = NodeId::new(3);
/// assert_eq!(node.get(), 3);
/// assert_eq!(node.to_string(), "3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new NodeId from its numeric value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the identifier
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}
