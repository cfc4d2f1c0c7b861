//! Workflow document export
//!
//! Projects a `GraphStore` into the portable document consumed by the
//! execution service. Every node carries the same `data` shape: its label
//! plus the universal field set, with unset fields omitted.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{FieldName, NodeType};
use crate::store::GraphStore;
use crate::types::{GraphEdge, GraphNode, NodeId, Position};

/// File extension of stored workflow documents
pub const WORKFLOW_FILE_EXTENSION: &str = ".json";

/// Content type of the serialized document
pub const WORKFLOW_CONTENT_TYPE: &str = "application/json";

/// Projected field values of an exported node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl NodeData {
    /// Copy the label and the universal fields off a node
    pub fn project(node: &GraphNode) -> Self {
        let read = |name: FieldName| node.field(name).map(str::to_owned);
        Self {
            label: node.label.clone(),
            url: read(FieldName::Url),
            selector: read(FieldName::Selector),
            input_text: read(FieldName::InputText),
            attribute: read(FieldName::Attribute),
            variable_name: read(FieldName::VariableName),
            filename: read(FieldName::Filename),
        }
    }

    /// Value of a universal field
    pub fn get(&self, name: FieldName) -> Option<&str> {
        let value = match name {
            FieldName::Url => &self.url,
            FieldName::Selector => &self.selector,
            FieldName::InputText => &self.input_text,
            FieldName::Attribute => &self.attribute,
            FieldName::VariableName => &self.variable_name,
            FieldName::Filename => &self.filename,
        };
        value.as_deref()
    }
}

/// A node as it appears in the exported document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub data: NodeData,
}

/// The exported workflow
///
/// Field order here is the key order of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub name: String,
    pub nodes: Vec<ExportedNode>,
    pub edges: Vec<GraphEdge>,
}

/// Serialized document ready to attach to an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowAttachment {
    /// Suggested file name ("<name>.json")
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export the current state of a store under a workflow name
///
/// Nodes and edges keep store insertion order.
pub fn export(store: &GraphStore, name: impl Into<String>) -> WorkflowDocument {
    let nodes = store
        .nodes()
        .iter()
        .map(|node| ExportedNode {
            id: node.id.clone(),
            node_type: node.node_type,
            position: node.position,
            data: NodeData::project(node),
        })
        .collect();

    WorkflowDocument {
        name: name.into(),
        nodes,
        edges: store.edges().to_vec(),
    }
}

impl WorkflowDocument {
    /// Canonical JSON text: two-space indented, fixed key order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a stored document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suggested file name of the document
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, WORKFLOW_FILE_EXTENSION)
    }

    /// Serialize and wrap as a file attachment
    pub fn attachment(&self) -> Result<WorkflowAttachment> {
        Ok(WorkflowAttachment {
            file_name: self.file_name(),
            content_type: WORKFLOW_CONTENT_TYPE,
            bytes: self.to_json()?.into_bytes(),
        })
    }

    /// Find an exported node by ID
    pub fn find_node(&self, id: &str) -> Option<&ExportedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_navigate_url_only() {
        let mut store = GraphStore::new();
        let nav = store.create_node(NodeType::Navigate, Position::new(10.0, 20.0));
        store.set_field(&nav.id, FieldName::Url, "https://example.com");

        let document = export(&store, "demo");
        let data = &document.nodes[0].data;
        assert_eq!(data.url.as_deref(), Some("https://example.com"));
        for field in FieldName::ALL.into_iter().filter(|f| *f != FieldName::Url) {
            assert_eq!(data.get(field), None, "{} should be absent", field);
        }

        let value: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(
            value["nodes"][0]["data"],
            json!({"label": "Navigate Node", "url": "https://example.com"})
        );
        assert_eq!(value["nodes"][0]["type"], json!("navigate"));
    }

    #[test]
    fn test_export_preserves_creation_order() {
        let mut store = GraphStore::new();
        // Positions deliberately reversed so a sort by position would differ
        let created: Vec<_> = [NodeType::Store, NodeType::Parse, NodeType::Navigate]
            .into_iter()
            .enumerate()
            .map(|(i, t)| store.create_node(t, Position::new(100.0 - i as f64, 0.0)).id)
            .collect();
        store.connect(&created[2], &created[1]).unwrap();
        store.connect(&created[1], &created[0]).unwrap();

        let document = export(&store, "ordered");
        let ids: Vec<_> = document.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, created);
        assert_eq!(document.edges, store.edges());
    }

    #[test]
    fn test_export_is_idempotent() {
        let mut store = GraphStore::with_boundary_nodes();
        let parse = store.create_node(NodeType::Parse, Position::new(1.5, 2.5));
        store.set_field(&parse.id, FieldName::Selector, "a.title");
        store.set_field(&parse.id, FieldName::Attribute, "href");
        store.connect("1", &parse.id).unwrap();

        let first = export(&store, "same").to_json().unwrap();
        let second = export(&store, "same").to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_order() {
        let mut store = GraphStore::new();
        let node = store.create_node(NodeType::Store, Position::new(0.0, 0.0));
        store.set_field(&node.id, FieldName::VariableName, "titles");
        store.set_field(&node.id, FieldName::Filename, "out.txt");
        let a = store.create_node(NodeType::Click, Position::new(0.0, 0.0));
        store.connect(&node.id, &a.id).unwrap();

        let text = export(&store, "keys").to_json().unwrap();
        let find = |needle: &str| text.find(needle).unwrap();

        assert!(find("\"name\"") < find("\"nodes\""));
        assert!(find("\"nodes\"") < find("\"edges\""));
        assert!(find("\"id\"") < find("\"type\""));
        assert!(find("\"type\"") < find("\"position\""));
        assert!(find("\"position\"") < find("\"data\""));
        assert!(find("\"label\"") < find("\"variableName\""));
        assert!(find("\"variableName\"") < find("\"filename\""));
        assert!(text.starts_with("{\n  \"name\": \"keys\""));
    }

    #[test]
    fn test_undeclared_names_are_dropped() {
        let mut store = GraphStore::new();
        let node = store.create_node(NodeType::Click, Position::default());
        store.set_field(&node.id, "timeout", "10s");
        store.set_field(&node.id, FieldName::Selector, "");

        let value = serde_json::to_value(export(&store, "x")).unwrap();
        assert_eq!(
            value["nodes"][0]["data"],
            json!({"label": "Click Node", "selector": ""})
        );
    }

    #[test]
    fn test_attachment_and_round_trip() {
        let mut store = GraphStore::with_boundary_nodes();
        store.connect("1", "2").unwrap();
        let document = export(&store, "my_workflow");

        let attachment = document.attachment().unwrap();
        assert_eq!(attachment.file_name, "my_workflow.json");
        assert_eq!(attachment.content_type, "application/json");

        let text = String::from_utf8(attachment.bytes).unwrap();
        let restored = WorkflowDocument::from_json(&text).unwrap();
        assert_eq!(restored, document);
        assert_eq!(restored.find_node("3").unwrap().node_type, NodeType::End);
    }

    #[test]
    fn test_non_finite_drop_still_round_trips() {
        let mut store = GraphStore::new();
        store.create_node(NodeType::Click, Position::new(f64::NAN, 1.0));

        let text = export(&store, "nan").to_json().unwrap();
        assert!(!text.contains("null"));
        let restored = WorkflowDocument::from_json(&text).unwrap();
        assert_eq!(restored.nodes[0].position, Position::new(0.0, 1.0));
    }

    #[test]
    fn test_document_is_a_snapshot() {
        let mut store = GraphStore::new();
        let node = store.create_node(NodeType::Navigate, Position::default());
        let document = export(&store, "snap");

        store.set_field(&node.id, FieldName::Url, "https://later.example");
        store.create_node(NodeType::Click, Position::default());

        assert_eq!(document.nodes.len(), 1);
        assert_eq!(document.nodes[0].data.url, None);
    }
}
