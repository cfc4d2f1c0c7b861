//! Browserflow Graph - the workflow graph behind the automation canvas
//!
//! This crate holds everything about a browser-automation workflow that does
//! not touch the network:
//!
//! - `NodeRegistry`: the catalog of node types and the fields each one edits
//! - `GraphStore`: the single-writer owner of nodes and edges
//! - `export`: projection of a store into a portable `WorkflowDocument`
//!
//! # Example
//!
//! ```
//! use browserflow_graph::{export, FieldName, GraphStore, NodeType, Position};
//!
//! let mut store = GraphStore::new();
//! let nav = store.create_node(NodeType::Navigate, Position::new(0.0, 0.0));
//! let click = store.create_node(NodeType::Click, Position::new(0.0, 120.0));
//! store.connect(&nav.id, &click.id).unwrap();
//! store.set_field(&nav.id, FieldName::Url, "https://example.com");
//!
//! let document = export(&store, "demo");
//! assert_eq!(document.nodes.len(), 2);
//! assert_eq!(document.attachment().unwrap().file_name, "demo.json");
//! ```

pub mod error;
pub mod export;
pub mod registry;
pub mod store;
pub mod types;

pub use error::{GraphError, Result};
pub use export::{export, ExportedNode, NodeData, WorkflowAttachment, WorkflowDocument};
pub use registry::{FieldDefinition, FieldName, NodeDefinition, NodeRegistry, NodeType};
pub use store::GraphStore;
pub use types::{GraphEdge, GraphNode, NodeId, Position};
