//! Error types for service commands

use browserflow_graph::GraphError;
use thiserror::Error;

/// Result type alias using ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

/// A service call that did not complete successfully
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection failure, or a body that could not be decoded
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The service answered 2xx with an error body
    #[error("{endpoint} refused the request: {message}")]
    Rejected { endpoint: String, message: String },

    /// The base URL cannot address service endpoints
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// The workflow document could not be serialized
    #[error("Document error: {0}")]
    Graph(#[from] GraphError),
}

impl ServiceError {
    /// Create a non-success status error
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }
}
