//! The external engine's workflow document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

use super::NodeId;

/// Only output port type the internal model knows about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionType {
    #[default]
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: NodeId,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    pub index: u32,
}

impl ConnectionTarget {
    pub fn main(node: impl Into<NodeId>) -> Self {
        Self {
            node: node.into(),
            kind: ConnectionType::Main,
            index: 0,
        }
    }
}

/// Outgoing connections of one source node. Each outgoing edge is its own
/// single-element list, in edge insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGroup {
    pub main: Vec<Vec<ConnectionTarget>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalNode {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub type_version: u32,
    pub position: [i64; 2],
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledDocument {
    /// Present only when the document is sent as an update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub nodes: BTreeMap<NodeId, ExternalNode>,
    pub connections: BTreeMap<NodeId, ConnectionGroup>,
    pub active: bool,
    pub settings: Map<String, Value>,
    pub static_data: Option<Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CompiledDocument {
    /// Copy of this document addressed to an existing engine workflow.
    pub fn with_id(
        &self,
        id: impl Into<String>,
    ) -> Self {
        let mut document = self.clone();
        document.id = Some(id.into());
        document
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document_wire_shape() {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "a".to_string(),
            ExternalNode {
                id: "a".to_string(),
                name: "Start".to_string(),
                kind: "n8n-nodes-base.manualTrigger".to_string(),
                type_version: 1,
                position: [10, -20],
                parameters: Map::new(),
            },
        );
        let mut connections = BTreeMap::new();
        connections.insert(
            "a".to_string(),
            ConnectionGroup {
                main: vec![vec![ConnectionTarget::main("b")]],
            },
        );
        let document = CompiledDocument {
            id: None,
            name: "demo".to_string(),
            nodes,
            connections,
            active: false,
            settings: Map::new(),
            static_data: None,
            tags: vec![],
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "demo",
                "nodes": {
                    "a": {
                        "id": "a",
                        "name": "Start",
                        "type": "n8n-nodes-base.manualTrigger",
                        "typeVersion": 1,
                        "position": [10, -20],
                        "parameters": {}
                    }
                },
                "connections": {
                    "a": { "main": [[{ "node": "b", "type": "main", "index": 0 }]] }
                },
                "active": false,
                "settings": {},
                "staticData": null,
                "tags": []
            })
        );
    }

    #[test]
    fn test_with_id_injects_id() {
        let document = CompiledDocument {
            id: None,
            name: "demo".to_string(),
            nodes: BTreeMap::new(),
            connections: BTreeMap::new(),
            active: false,
            settings: Map::new(),
            static_data: None,
            tags: vec![],
        };

        let update = document.with_id("42");
        assert_eq!(update.id.as_deref(), Some("42"));
        assert_eq!(serde_json::to_value(&update).unwrap()["id"], json!("42"));
        assert!(document.id.is_none());
    }
}
