//! Node type catalog
//!
//! The registry is pure data: for every `NodeType` it knows the canonical
//! label and the ordered list of fields the editor renders for it. It is
//! keyed on the closed `NodeType` variant, never on label text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// The type of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Type text into an element
    Input,
    /// Read text or an attribute from elements into a variable
    Parse,
    /// Append a variable to a file
    Store,
    /// Click an element
    Click,
    /// Open a URL
    Navigate,
    /// Fixed entry boundary of the canvas
    Start,
    /// Fixed exit boundary of the canvas
    End,
}

impl NodeType {
    /// Node types offered by the add-node palette, in display order
    pub const PALETTE: [NodeType; 5] = [
        NodeType::Input,
        NodeType::Parse,
        NodeType::Store,
        NodeType::Click,
        NodeType::Navigate,
    ];

    /// Capitalized type name ("Navigate")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Parse => "Parse",
            Self::Store => "Store",
            Self::Click => "Click",
            Self::Navigate => "Navigate",
            Self::Start => "Start",
            Self::End => "End",
        }
    }

    /// Lowercase wire name ("navigate")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Parse => "parse",
            Self::Store => "store",
            Self::Click => "click",
            Self::Navigate => "navigate",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    /// Whether this is one of the structural start/end markers
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeType {
    type Err = GraphError;

    /// Case-insensitive, so both palette names and wire names parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "parse" => Ok(Self::Parse),
            "store" => Ok(Self::Store),
            "click" => Ok(Self::Click),
            "navigate" => Ok(Self::Navigate),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(GraphError::UnknownNodeType(s.to_string())),
        }
    }
}

/// A field from the universal field set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Url,
    Selector,
    InputText,
    Attribute,
    VariableName,
    Filename,
}

impl FieldName {
    /// The universal field set in export order
    pub const ALL: [FieldName; 6] = [
        FieldName::Url,
        FieldName::Selector,
        FieldName::InputText,
        FieldName::Attribute,
        FieldName::VariableName,
        FieldName::Filename,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Selector => "selector",
            Self::InputText => "inputText",
            Self::Attribute => "attribute",
            Self::VariableName => "variableName",
            Self::Filename => "filename",
        }
    }

    /// Look up a field by its wire name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An editable field as rendered by the node editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: FieldName,
    pub placeholder: &'static str,
}

/// Definition of a node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    pub node_type: NodeType,
    pub label: String,
    pub fields: Vec<FieldDefinition>,
}

/// Catalog of node types
pub struct NodeRegistry;

impl NodeRegistry {
    /// Ordered fields a node type exposes for editing
    pub fn fields(node_type: NodeType) -> &'static [FieldName] {
        use FieldName::*;
        match node_type {
            NodeType::Navigate => &[Url],
            NodeType::Click => &[Selector],
            NodeType::Input => &[Selector, InputText],
            NodeType::Parse => &[Selector, Attribute, VariableName],
            NodeType::Store => &[Filename, VariableName],
            NodeType::Start | NodeType::End => &[],
        }
    }

    /// Whether a node type declares a field
    pub fn declares(node_type: NodeType, field: FieldName) -> bool {
        Self::fields(node_type).contains(&field)
    }

    /// Canonical label ("Navigate Node")
    pub fn label(node_type: NodeType) -> String {
        format!("{} Node", node_type.name())
    }

    /// Editor placeholder text for a field of a node type
    pub fn placeholder(node_type: NodeType, field: FieldName) -> &'static str {
        match (node_type, field) {
            (_, FieldName::Url) => "URL",
            (_, FieldName::Selector) => "CSS Selector",
            (_, FieldName::InputText) => "Text to input",
            (_, FieldName::Attribute) => "Attribute (e.g. href, text)",
            (NodeType::Store, FieldName::VariableName) => "Variable (e.g. parsed_value)",
            (_, FieldName::VariableName) => "Variable name",
            (_, FieldName::Filename) => "File name (e.g. data.txt)",
        }
    }

    /// Full definition of a node type
    pub fn definition(node_type: NodeType) -> NodeDefinition {
        NodeDefinition {
            node_type,
            label: Self::label(node_type),
            fields: Self::fields(node_type)
                .iter()
                .map(|&name| FieldDefinition {
                    name,
                    placeholder: Self::placeholder(node_type, name),
                })
                .collect(),
        }
    }

    /// Definitions for the add-node palette
    pub fn palette() -> Vec<NodeDefinition> {
        NodeType::PALETTE.into_iter().map(Self::definition).collect()
    }
}
