//! Single-writer graph storage
//!
//! The `GraphStore` owns the nodes and edges of one canvas and is the only
//! way to mutate them. Insertion order of both collections is preserved for
//! the lifetime of the store and is the order used by export.

use crate::error::{GraphError, Result};
use crate::registry::NodeType;
use crate::types::{GraphEdge, GraphNode, NodeId, Position};

/// In-memory workflow graph with a store-owned id sequence
///
/// # Example
///
/// ```
/// use browserflow_graph::{GraphStore, NodeType, Position};
///
/// let mut store = GraphStore::with_boundary_nodes();
/// let node = store.create_node(NodeType::Navigate, Position::new(100.0, 100.0));
/// assert_eq!(node.id, "4");
/// assert!(store.connect("1", &node.id).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    /// Next id to hand out; only ever increases
    next_id: u64,
}

impl GraphStore {
    /// Create an empty store whose first node gets id "1"
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 1,
        }
    }

    /// Create the default canvas: Start, a Click step, End
    ///
    /// The boundary nodes take ids "1" through "3", so the first node the
    /// user adds gets "4".
    pub fn with_boundary_nodes() -> Self {
        let mut store = Self::new();
        store.create_node(NodeType::Start, Position::new(50.0, 50.0));
        store.create_node(NodeType::Click, Position::new(250.0, 150.0));
        store.create_node(NodeType::End, Position::new(450.0, 250.0));
        store
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    /// Add a node with a fresh id, the canonical label and no field values
    ///
    /// Non-finite coordinates are placed at 0.
    pub fn create_node(&mut self, node_type: NodeType, position: Position) -> GraphNode {
        if !position.is_finite() {
            log::warn!(
                "Non-finite position ({}, {}) for new {} node",
                position.x,
                position.y,
                node_type.as_str()
            );
        }
        let position = position.or_origin();
        let node = GraphNode::new(self.allocate_id(), node_type, position);
        log::debug!(
            "Created {} node '{}' at ({}, {})",
            node_type.as_str(),
            node.id,
            position.x,
            position.y
        );
        self.nodes.push(node.clone());
        node
    }

    /// Append an edge between two existing nodes
    ///
    /// Parallel edges and self-loops are accepted. If either endpoint is
    /// missing the graph is left unchanged.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<GraphEdge> {
        for id in [source, target] {
            if !self.contains_node(id) {
                log::warn!("Rejected edge {} -> {}: unknown node '{}'", source, target, id);
                return Err(GraphError::UnknownNode(id.to_string()));
            }
        }

        let edge = GraphEdge::new(source, target);
        log::debug!("Connected {} -> {}", source, target);
        self.edges.push(edge.clone());
        Ok(edge)
    }

    /// Replace the value of a field on a node
    ///
    /// Any field name is accepted; the registry only matters at export.
    /// A missing node id is a no-op, since editor events may arrive for a
    /// node the store has not materialized.
    pub fn set_field(&mut self, node_id: &str, field: impl AsRef<str>, value: impl Into<String>) {
        let field = field.as_ref();
        match self.find_node_mut(node_id) {
            Some(node) => {
                node.fields.insert(field.to_string(), value.into());
                log::debug!("Set field '{}' on node '{}'", field, node_id);
            }
            None => {
                log::debug!("Ignored field '{}' for missing node '{}'", field, node_id);
            }
        }
    }

    /// Move a node on the canvas
    ///
    /// A non-finite position is rejected and the node stays where it was.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<()> {
        if !position.is_finite() {
            return Err(GraphError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }
        let node = self
            .find_node_mut(node_id)
            .ok_or_else(|| GraphError::UnknownNode(node_id.to_string()))?;
        node.position = position;
        log::debug!("Moved node '{}' to ({}, {})", node_id, position.x, position.y);
        Ok(())
    }

    /// Remove a node together with every edge touching it
    ///
    /// The removed id is never handed out again.
    pub fn remove_node(&mut self, node_id: &str) -> Result<GraphNode> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| GraphError::UnknownNode(node_id.to_string()))?;

        let node = self.nodes.remove(index);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        log::debug!(
            "Removed node '{}' and {} attached edge(s)",
            node_id,
            before - self.edges.len()
        );
        Ok(node)
    }

    /// Remove the edge at `index` in insertion order
    pub fn remove_edge(&mut self, index: usize) -> Option<GraphEdge> {
        if index < self.edges.len() {
            let edge = self.edges.remove(index);
            log::debug!("Removed edge {} -> {}", edge.source, edge.target);
            Some(edge)
        } else {
            None
        }
    }

    /// Find a node by ID
    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    fn find_node_mut(&mut self, node_id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    /// Check if a node exists
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldName;
    use std::collections::HashSet;

    fn origin() -> Position {
        Position::new(0.0, 0.0)
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut store = GraphStore::new();
        let mut seen = HashSet::new();
        for node_type in NodeType::PALETTE.iter().cycle().take(20) {
            let node = store.create_node(*node_type, origin());
            assert!(seen.insert(node.id.clone()), "duplicate id {}", node.id);
        }

        let ids: Vec<_> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        let expected: Vec<String> = (1..=20).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_boundary_nodes_seed_counter() {
        let mut store = GraphStore::with_boundary_nodes();
        let types: Vec<_> = store.nodes().iter().map(|n| n.node_type).collect();
        assert_eq!(types, vec![NodeType::Start, NodeType::Click, NodeType::End]);
        assert_eq!(store.nodes()[0].position, Position::new(50.0, 50.0));

        let node = store.create_node(NodeType::Input, origin());
        assert_eq!(node.id, "4");
        assert_eq!(node.label, "Input Node");
    }

    #[test]
    fn test_separate_stores_do_not_share_ids() {
        let mut first = GraphStore::new();
        let mut second = GraphStore::new();
        first.create_node(NodeType::Click, origin());
        first.create_node(NodeType::Click, origin());
        assert_eq!(second.create_node(NodeType::Click, origin()).id, "1");
    }

    #[test]
    fn test_connect_allows_parallel_edges() {
        let mut store = GraphStore::new();
        let a = store.create_node(NodeType::Navigate, origin());
        let b = store.create_node(NodeType::Click, origin());

        store.connect(&a.id, &b.id).unwrap();
        store.connect(&a.id, &b.id).unwrap();
        assert_eq!(store.edges().len(), 2);
        assert_eq!(store.edges()[0], store.edges()[1]);
    }

    #[test]
    fn test_connect_unknown_node_leaves_edges_unchanged() {
        let mut store = GraphStore::new();
        let a = store.create_node(NodeType::Navigate, origin());
        let b = store.create_node(NodeType::Click, origin());
        store.connect(&a.id, &b.id).unwrap();
        let before = store.edges().to_vec();

        let err = store.connect(&a.id, "99").unwrap_err();
        assert_eq!(err.node_id(), Some("99"));
        let err = store.connect("42", &b.id).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(id) if id == "42"));

        assert_eq!(store.edges(), before.as_slice());
    }

    #[test]
    fn test_set_field_on_missing_node_is_noop() {
        let mut store = GraphStore::with_boundary_nodes();
        store.connect("1", "2").unwrap();
        let nodes = store.nodes().to_vec();
        let edges = store.edges().to_vec();

        store.set_field("404", FieldName::Url, "https://example.com");

        assert_eq!(store.nodes(), nodes.as_slice());
        assert_eq!(store.edges(), edges.as_slice());
    }

    #[test]
    fn test_set_field_replaces_value_and_keeps_identity() {
        let mut store = GraphStore::new();
        let node = store.create_node(NodeType::Click, Position::new(3.0, 4.0));

        store.set_field(&node.id, FieldName::Selector, "#first");
        store.set_field(&node.id, FieldName::Selector, "#second");
        // Undeclared for Click, still stored
        store.set_field(&node.id, "url", "https://example.com");

        let stored = store.node(&node.id).unwrap();
        assert_eq!(stored.field(FieldName::Selector), Some("#second"));
        assert_eq!(stored.field(FieldName::Url), Some("https://example.com"));
        assert_eq!(stored.id, node.id);
        assert_eq!(stored.position, Position::new(3.0, 4.0));
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let mut store = GraphStore::with_boundary_nodes();
        store.connect("1", "2").unwrap();
        store.connect("2", "3").unwrap();
        store.connect("1", "3").unwrap();

        let removed = store.remove_node("2").unwrap();
        assert_eq!(removed.node_type, NodeType::Click);
        assert_eq!(store.edges(), &[GraphEdge::new("1", "3")]);
        assert!(store.remove_node("2").is_err());

        // Removed ids are not reissued
        let node = store.create_node(NodeType::Click, origin());
        assert_eq!(node.id, "4");
    }

    #[test]
    fn test_move_node() {
        let mut store = GraphStore::with_boundary_nodes();
        store.move_node("3", Position::new(10.0, 20.0)).unwrap();
        assert_eq!(store.node("3").unwrap().position, Position::new(10.0, 20.0));
        assert!(matches!(
            store.move_node("9", origin()),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_non_finite_positions_never_reach_the_graph() {
        let mut store = GraphStore::new();
        let node = store.create_node(NodeType::Click, Position::new(f64::NAN, 1.0));
        assert_eq!(node.position, Position::new(0.0, 1.0));

        store.move_node(&node.id, Position::new(5.0, 5.0)).unwrap();
        assert!(matches!(
            store.move_node(&node.id, Position::new(2.0, f64::INFINITY)),
            Err(GraphError::InvalidPosition { .. })
        ));
        assert_eq!(store.node(&node.id).unwrap().position, Position::new(5.0, 5.0));
    }

    #[test]
    fn test_remove_edge_by_index() {
        let mut store = GraphStore::with_boundary_nodes();
        store.connect("1", "2").unwrap();
        store.connect("2", "3").unwrap();

        assert_eq!(store.remove_edge(0), Some(GraphEdge::new("1", "2")));
        assert_eq!(store.remove_edge(5), None);
        assert_eq!(store.edges(), &[GraphEdge::new("2", "3")]);
    }
}
