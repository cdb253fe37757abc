//! The graph store: authoritative node and edge lists of one workflow.
//!
//! Both lists keep insertion order. The order of `edges` is significant, the
//! compiler emits connections in exactly that order.

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    model::{Connection, EdgeModel, NodeData, NodeDataPatch, NodeDescriptor, NodeModel, Position, TemplateInstance},
    utils,
    workflow::{
        changes::{EdgeChange, NodeChange},
        consts::DEFAULT_WORKFLOW_NAME,
    },
};

/// One workflow being edited: metadata plus node and edge lists.
///
/// Every mutation is a plain `&mut self` call, so two edits can never
/// interleave. Nothing here performs I/O or returns an error: edits naming
/// unknown ids are silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    name: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    nodes: Vec<NodeModel>,
    edges: Vec<EdgeModel>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// create an empty graph with the default name
    pub fn new() -> Self {
        Self {
            name: DEFAULT_WORKFLOW_NAME.to_string(),
            description: String::new(),
            tags: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn nodes(&self) -> &[NodeModel] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeModel] {
        &self.edges
    }

    pub fn set_name(
        &mut self,
        name: impl Into<String>,
    ) {
        self.name = name.into();
    }

    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) {
        self.description = description.into();
    }

    pub fn set_tags(
        &mut self,
        tags: Vec<String>,
    ) {
        self.tags = tags;
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&NodeModel> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// get edge by id
    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&EdgeModel> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Append a new node with a fresh id and return a copy of it.
    pub fn add_node(
        &mut self,
        descriptor: NodeDescriptor,
        position: Position,
    ) -> NodeModel {
        let node = NodeModel {
            id: utils::node_id(),
            kind: descriptor.kind.clone(),
            position,
            data: NodeData {
                label: descriptor.label,
                kind: descriptor.kind,
                parameters: descriptor.parameters,
            },
            selected: false,
            dragging: false,
        };
        trace!("graph::add_node({}, {})", node.id, node.kind);
        self.nodes.push(node.clone());
        node
    }

    /// Shallow-merge `patch` into the node's data. Unknown ids are ignored.
    pub fn update_node(
        &mut self,
        id: &str,
        patch: NodeDataPatch,
    ) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            trace!("graph::update_node({})", id);
            node.data.merge(patch);
        }
    }

    /// Remove the node only. Edges pointing at it stay in the edge list.
    ///
    /// Use [`Graph::remove_node`] to drop those edges in the same call.
    pub fn delete_node(
        &mut self,
        id: &str,
    ) {
        trace!("graph::delete_node({})", id);
        self.nodes.retain(|n| n.id != id);
    }

    /// Remove the node and every edge touching it. Returns the removed edges.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Vec<EdgeModel> {
        self.delete_node(id);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.edges).into_iter().partition(|e| e.source == id || e.target == id);
        self.edges = kept;
        removed
    }

    /// Drop edges whose source or target is not in the node list.
    pub fn prune_dangling_edges(&mut self) -> Vec<EdgeModel> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let (kept, removed): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.edges).into_iter().partition(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
        self.edges = kept;
        removed
    }

    /// Edges whose source or target is not in the node list.
    pub fn dangling_edges(&self) -> Vec<&EdgeModel> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges.iter().filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str())).collect()
    }

    /// Turn a drawn connection into an edge. Duplicates are kept.
    pub fn on_connect(
        &mut self,
        connection: Connection,
    ) -> EdgeModel {
        let edge = EdgeModel {
            id: utils::edge_id(),
            source: connection.source,
            target: connection.target,
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
            selected: false,
        };
        trace!("graph::on_connect({} -> {})", edge.source, edge.target);
        self.edges.push(edge.clone());
        edge
    }

    /// Apply a batch of canvas deltas to the node list.
    ///
    /// Applying the same batch twice leaves the graph as applying it once.
    pub fn apply_node_changes(
        &mut self,
        changes: Vec<NodeChange>,
    ) {
        for change in changes {
            match change {
                NodeChange::Position {
                    id,
                    position,
                    dragging,
                } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                        if let Some(position) = position {
                            node.position = position;
                        }
                        if let Some(dragging) = dragging {
                            node.dragging = dragging;
                        }
                    }
                }
                NodeChange::Select {
                    id,
                    selected,
                } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                        node.selected = selected;
                    }
                }
                NodeChange::Remove {
                    id,
                } => self.delete_node(&id),
            }
        }
    }

    /// Apply a batch of canvas deltas to the edge list.
    pub fn apply_edge_changes(
        &mut self,
        changes: Vec<EdgeChange>,
    ) {
        for change in changes {
            match change {
                EdgeChange::Select {
                    id,
                    selected,
                } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
                        edge.selected = selected;
                    }
                }
                EdgeChange::Remove {
                    id,
                } => self.edges.retain(|e| e.id != id),
            }
        }
    }

    /// Swap both lists out wholesale.
    pub fn replace(
        &mut self,
        nodes: Vec<NodeModel>,
        edges: Vec<EdgeModel>,
    ) {
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Replace metadata and contents with a template instance. Tags are reset.
    pub fn load(
        &mut self,
        instance: TemplateInstance,
    ) {
        trace!("graph::load({})", instance.name);
        self.name = instance.name;
        self.description = instance.description;
        self.tags.clear();
        self.replace(instance.nodes, instance.edges);
    }

    /// Reset to an empty, default-named workflow.
    pub fn clear_workflow(&mut self) {
        self.load(TemplateInstance {
            name: DEFAULT_WORKFLOW_NAME.to_string(),
            ..Default::default()
        });
    }

    /// Human-readable representation of the graph.
    pub fn schema(&self) -> String {
        let mut graph: DiGraph<&NodeModel, &EdgeModel> = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
        for node in self.nodes.iter() {
            indices.insert(node.id.as_str(), graph.add_node(node));
        }
        let mut dangling = Vec::new();
        for edge in self.edges.iter() {
            match (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) {
                (Some(s), Some(t)) => {
                    graph.add_edge(*s, *t, edge);
                }
                _ => dangling.push(edge),
            }
        }

        let mut lines = Vec::new();
        lines.push(format!("=== {} ===", self.name));
        lines.push(format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len()));
        lines.push(String::new());

        lines.push("--- Nodes ---".to_string());
        for node in self.nodes.iter() {
            lines.push(format!("[{}] {} (type: {})", node.id, node.data.label, node.data.kind));
        }
        lines.push(String::new());

        lines.push("--- Graph Structure ---".to_string());
        for idx in graph.node_indices() {
            // petgraph walks outgoing edges newest first
            let mut outgoing: Vec<String> = graph.edges_directed(idx, Direction::Outgoing).map(|e| graph[e.target()].id.clone()).collect();
            outgoing.reverse();
            if outgoing.is_empty() {
                lines.push(format!("{} -> (end)", graph[idx].id));
            } else {
                lines.push(format!("{} -> {}", graph[idx].id, outgoing.join(", ")));
            }
        }

        if !dangling.is_empty() {
            lines.push(String::new());
            lines.push("--- Dangling Edges ---".to_string());
            for edge in dangling {
                lines.push(format!("{} --> {} (id: {})", edge.source, edge.target, edge.id));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;

    fn params(value: serde_json::Value) -> Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    fn two_node_graph() -> (Graph, NodeModel, NodeModel, EdgeModel) {
        let mut graph = Graph::new();
        let a = graph.add_node(NodeDescriptor::new("trigger", "Start"), Position::new(0.0, 0.0));
        let b = graph.add_node(NodeDescriptor::new("email", "Send"), Position::new(200.0, 0.0));
        let edge = graph.on_connect(Connection::new(a.id.clone(), b.id.clone()));
        (graph, a, b, edge)
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = Graph::new();
        assert_eq!(graph.name(), "My Workflow");
        assert_eq!(graph.description(), "");
        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_add_node_appends_with_fresh_id() {
        let mut graph = Graph::new();
        let first = graph.add_node(NodeDescriptor::new("http", "Fetch"), Position::new(1.0, 2.0));
        let second = graph.add_node(NodeDescriptor::new("http", "Fetch"), Position::new(1.0, 2.0));

        assert_ne!(first.id, second.id);
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.nodes()[0].id, first.id);
        assert_eq!(graph.nodes()[1].id, second.id);
        assert_eq!(first.kind, "http");
        assert_eq!(first.data.kind, "http");
        assert_eq!(first.data.label, "Fetch");
        assert_eq!(first.position, Position::new(1.0, 2.0));
    }

    #[test]
    fn test_update_node_merges_data() {
        let mut graph = Graph::new();
        let node = graph.add_node(
            NodeDescriptor::new("email", "Send").with_parameters(params(json!({"to": "a@example.com"}))),
            Position::default(),
        );

        graph.update_node(
            &node.id,
            NodeDataPatch {
                label: Some("Send welcome".to_string()),
                ..Default::default()
            },
        );
        let updated = graph.node(&node.id).unwrap();
        assert_eq!(updated.data.label, "Send welcome");
        assert_eq!(updated.data.kind, "email");
        assert_eq!(updated.data.parameters["to"], json!("a@example.com"));

        graph.update_node(
            &node.id,
            NodeDataPatch {
                parameters: Some(params(json!({"subject": "Hi"}))),
                ..Default::default()
            },
        );
        let updated = graph.node(&node.id).unwrap();
        assert_eq!(updated.data.parameters.len(), 1);
        assert_eq!(updated.data.parameters["subject"], json!("Hi"));
    }

    #[test]
    fn test_update_missing_node_is_noop() {
        let (mut graph, ..) = two_node_graph();
        let before = graph.clone();
        graph.update_node(
            "missing",
            NodeDataPatch {
                label: Some("x".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn test_delete_node_leaves_edges() {
        let (mut graph, a, b, edge) = two_node_graph();

        graph.delete_node(&a.id);

        assert!(graph.node(&a.id).is_none());
        assert!(graph.node(&b.id).is_some());
        assert_eq!(graph.edges(), &[edge.clone()]);
        assert_eq!(graph.dangling_edges(), vec![&edge]);
    }

    #[test]
    fn test_remove_node_cascades() {
        let (mut graph, a, b, edge) = two_node_graph();
        let c = graph.add_node(NodeDescriptor::new("slack", "Notify"), Position::default());
        let kept = graph.on_connect(Connection::new(b.id.clone(), c.id.clone()));

        let removed = graph.remove_node(&a.id);

        assert_eq!(removed, vec![edge]);
        assert_eq!(graph.edges(), &[kept]);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_prune_dangling_edges() {
        let (mut graph, a, ..) = two_node_graph();
        graph.delete_node(&a.id);

        let removed = graph.prune_dangling_edges();

        assert_eq!(removed.len(), 1);
        assert!(graph.edges().is_empty());
        assert!(graph.prune_dangling_edges().is_empty());
    }

    #[test]
    fn test_on_connect_allows_duplicates() {
        let (mut graph, a, b, first) = two_node_graph();
        let second = graph.on_connect(Connection {
            source: a.id.clone(),
            target: b.id.clone(),
            source_handle: Some("out".to_string()),
            target_handle: None,
        });

        assert_ne!(first.id, second.id);
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[1].source_handle.as_deref(), Some("out"));
    }

    #[test]
    fn test_apply_node_changes_is_idempotent() {
        let (mut graph, a, b, _) = two_node_graph();
        let changes = vec![
            NodeChange::Position {
                id: a.id.clone(),
                position: Some(Position::new(50.0, 60.0)),
                dragging: Some(true),
            },
            NodeChange::Select {
                id: b.id.clone(),
                selected: true,
            },
            NodeChange::Select {
                id: "missing".to_string(),
                selected: true,
            },
        ];

        graph.apply_node_changes(changes.clone());
        let once = graph.clone();
        graph.apply_node_changes(changes);

        assert_eq!(graph, once);
        let moved = graph.node(&a.id).unwrap();
        assert_eq!(moved.position, Position::new(50.0, 60.0));
        assert!(moved.dragging);
        assert!(graph.node(&b.id).unwrap().selected);
        assert_eq!(graph.nodes()[0].id, a.id);
    }

    #[test]
    fn test_apply_node_remove_change() {
        let (mut graph, a, ..) = two_node_graph();
        graph.apply_node_changes(vec![NodeChange::Remove {
            id: a.id.clone(),
        }]);

        assert_eq!(graph.nodes().len(), 1);
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_apply_edge_changes() {
        let (mut graph, _, _, edge) = two_node_graph();
        graph.apply_edge_changes(vec![EdgeChange::Select {
            id: edge.id.clone(),
            selected: true,
        }]);
        assert!(graph.edge(&edge.id).unwrap().selected);

        let removal = vec![EdgeChange::Remove {
            id: edge.id.clone(),
        }];
        graph.apply_edge_changes(removal.clone());
        graph.apply_edge_changes(removal);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn test_change_wire_format() {
        let change: NodeChange = serde_json::from_value(json!({"type": "position", "id": "n1", "position": {"x": 1.5, "y": 2.0}})).unwrap();
        assert_eq!(
            change,
            NodeChange::Position {
                id: "n1".to_string(),
                position: Some(Position::new(1.5, 2.0)),
                dragging: None,
            }
        );
    }

    #[test]
    fn test_clear_workflow() {
        let (mut graph, ..) = two_node_graph();
        graph.set_name("Custom");
        graph.set_description("something");
        graph.set_tags(vec!["crm".to_string()]);

        graph.clear_workflow();

        assert_eq!(graph, Graph::new());
    }

    #[test]
    fn test_schema() {
        let (mut graph, a, b, _) = two_node_graph();
        graph.on_connect(Connection::new(a.id.clone(), "ghost"));

        let schema = graph.schema();
        assert!(schema.contains("Nodes: 2, Edges: 2"));
        assert!(schema.contains(&format!("{} -> {}", a.id, b.id)));
        assert!(schema.contains(&format!("{} -> (end)", b.id)));
        assert!(schema.contains("--- Dangling Edges ---"));
        assert!(schema.contains(&format!("{} --> ghost", a.id)));
    }

    #[test]
    fn test_graph_serde() {
        let (graph, ..) = two_node_graph();
        let text = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&text).unwrap();
        assert_eq!(back, graph);
    }
}
