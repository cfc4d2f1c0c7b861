//! Error types for the workflow graph

use thiserror::Error;

use crate::types::NodeId;

/// Result type alias using GraphError
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building or exporting a graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// An operation referenced a node id that is not in the graph
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// A coordinate is NaN or infinite
    #[error("Invalid position ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    /// A node type name is not part of the catalog
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// The node id referenced by an `UnknownNode` error
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::UnknownNode(id) => Some(id),
            _ => None,
        }
    }
}
