use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// node id
pub type NodeId = String;

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// display label, also used as the external node name
    pub label: String,
    /// internal vocabulary key resolved by the compiler
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dragging: bool,
}

/// What the caller knows about a node before it exists in a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl NodeDescriptor {
    pub fn new(
        kind: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            parameters: Map::new(),
        }
    }

    pub fn with_parameters(
        mut self,
        parameters: Map<String, Value>,
    ) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Partial node data. Every present field replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl NodeData {
    pub fn merge(
        &mut self,
        patch: NodeDataPatch,
    ) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(parameters) = patch.parameters {
            self.parameters = parameters;
        }
    }
}
