//! Translation of a [`Graph`] into the external engine's document schema.
//!
//! [`compile`] is pure and total: the same graph always yields the same
//! document, and every graph yields one. Unknown node types degrade to the
//! no-op type instead of failing.

mod tables;

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    model::{CompiledDocument, ConnectionGroup, ConnectionTarget, ExternalNode, NodeId, NodeModel, Position},
    workflow::Graph,
};

pub use tables::{FALLBACK, NODE_TYPES, NodeKind, NodeTypeEntry, resolve};

/// Compile a graph snapshot. Never mutates the graph.
pub fn compile(graph: &Graph) -> CompiledDocument {
    let nodes: BTreeMap<NodeId, ExternalNode> = graph.nodes().iter().map(|node| (node.id.clone(), compile_node(node))).collect();

    let mut connections: BTreeMap<NodeId, ConnectionGroup> = BTreeMap::new();
    for edge in graph.edges() {
        connections.entry(edge.source.clone()).or_default().main.push(vec![ConnectionTarget::main(edge.target.clone())]);
    }

    debug!("compiled workflow '{}': {} nodes, {} sources", graph.name(), nodes.len(), connections.len());

    CompiledDocument {
        id: None,
        name: graph.name().to_string(),
        nodes,
        connections,
        active: false,
        settings: Map::new(),
        static_data: None,
        tags: graph.tags().to_vec(),
    }
}

fn compile_node(node: &NodeModel) -> ExternalNode {
    let entry = resolve(&node.data.kind);
    let name = if node.data.label.is_empty() {
        node.id.clone()
    } else {
        node.data.label.clone()
    };

    ExternalNode {
        id: node.id.clone(),
        name,
        kind: entry.external.to_string(),
        type_version: entry.version,
        position: round_position(node.position),
        parameters: resolve_parameters(entry, &node.data.parameters),
    }
}

/// Type defaults overlaid with the node's explicit parameters.
fn resolve_parameters(
    entry: &NodeTypeEntry,
    explicit: &Map<String, Value>,
) -> Map<String, Value> {
    if entry.kind.is_none() {
        return Map::new();
    }
    let mut parameters = (entry.defaults)();
    for (key, value) in explicit {
        parameters.insert(key.clone(), value.clone());
    }
    parameters
}

fn round_position(position: Position) -> [i64; 2] {
    [round_coordinate(position.x), round_coordinate(position.y)]
}

/// Nearest integer, halves away from zero. NaN and infinities land on 0.
fn round_coordinate(value: f64) -> i64 {
    if value.is_finite() { value.round() as i64 } else { 0 }
}
