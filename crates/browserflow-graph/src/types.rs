//! Core types for workflow graphs
//!
//! These types describe the live graph held by the `GraphStore`: typed
//! nodes placed on the canvas and the directed edges between them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{FieldName, NodeRegistry, NodeType};

/// Unique identifier for a node
pub type NodeId = String;

/// Canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates can be written as JSON numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Copy with every non-finite coordinate replaced by 0
    pub fn or_origin(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self::new(finite(self.x), finite(self.y))
    }
}

/// A node instance in a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique identifier, never reused within a store
    pub id: NodeId,
    /// Semantic type, the only thing the registry keys on
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display name ("Navigate Node"), derived from `node_type`
    pub label: String,
    /// Position in the UI
    pub position: Position,
    /// Field values keyed by field name
    ///
    /// Holds whatever the editor wrote, including names the node's type
    /// does not declare. Unset fields are absent.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl GraphNode {
    /// Create a node with an empty field map and the canonical label
    pub fn new(id: impl Into<NodeId>, node_type: NodeType, position: Position) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: NodeRegistry::label(node_type),
            position,
            fields: BTreeMap::new(),
        }
    }

    /// Read one of the universal fields
    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.fields.get(name.as_str()).map(String::as_str)
    }

    /// Declared fields of this node, paired with their current values
    pub fn declared_fields(&self) -> impl Iterator<Item = (FieldName, Option<&str>)> + '_ {
        NodeRegistry::fields(self.node_type)
            .iter()
            .map(move |name| (*name, self.field(*name)))
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
}

impl GraphEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether either endpoint is the given node
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_label_follows_type() {
        let node = GraphNode::new("7", NodeType::Parse, Position::new(1.0, 2.0));
        assert_eq!(node.label, "Parse Node");
        assert!(node.fields.is_empty());
    }

    #[test]
    fn test_declared_fields_report_values() {
        let mut node = GraphNode::new("1", NodeType::Input, Position::default());
        node.fields
            .insert("inputText".to_string(), "hello".to_string());

        let fields: Vec<_> = node.declared_fields().collect();
        assert_eq!(
            fields,
            vec![
                (FieldName::Selector, None),
                (FieldName::InputText, Some("hello")),
            ]
        );
    }

    #[test]
    fn test_non_finite_position() {
        assert!(Position::new(1.0, -2.0).is_finite());
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
        assert_eq!(
            Position::new(f64::NAN, f64::INFINITY).or_origin(),
            Position::new(0.0, 0.0)
        );
        assert_eq!(Position::new(3.0, f64::NEG_INFINITY).or_origin(), Position::new(3.0, 0.0));
    }

    #[test]
    fn test_edge_touches() {
        let edge = GraphEdge::new("1", "2");
        assert!(edge.touches("1"));
        assert!(edge.touches("2"));
        assert!(!edge.touches("3"));
    }
}
