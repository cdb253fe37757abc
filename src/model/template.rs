use serde::{Deserialize, Serialize};

use crate::{FlowError, Result};

use super::{EdgeModel, NodeModel};

/// An immutable blueprint graph. Only ever copied out, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

impl WorkflowTemplate {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<WorkflowTemplate>(s).map_err(|e| FlowError::Workflow(format!("{}", e)))
    }
}

/// A fresh copy of a template, ready to replace a graph's contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateInstance {
    pub name: String,
    pub description: String,
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_json() {
        let text = r#"{
            "id": "ping",
            "name": "Ping",
            "description": "call an endpoint",
            "category": "ops",
            "nodes": [
                {"id": "a", "type": "trigger", "position": {"x": 0, "y": 0}, "data": {"label": "Go", "type": "trigger"}},
                {"id": "b", "type": "http", "position": {"x": 200, "y": 0}, "data": {"label": "Call", "type": "http", "parameters": {"url": "https://example.com"}}}
            ],
            "edges": [{"id": "e1", "source": "a", "target": "b", "sourceHandle": "out"}]
        }"#;

        let template = WorkflowTemplate::from_json(text).unwrap();
        assert_eq!(template.nodes.len(), 2);
        assert!(template.nodes[0].data.parameters.is_empty());
        assert_eq!(template.nodes[1].data.parameters["url"], "https://example.com");
        assert_eq!(template.edges[0].source_handle.as_deref(), Some("out"));
        assert_eq!(template.edges[0].target_handle, None);

        assert!(matches!(WorkflowTemplate::from_json("{}"), Err(FlowError::Workflow(_))));
    }
}
