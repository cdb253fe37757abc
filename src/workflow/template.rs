//! Read-only template registry and template instantiation.
//!
//! The registry is an ordinary value handed to whoever needs it. Loading a
//! template never edits the template itself; each load produces a copy with
//! fresh node and edge ids so two loads of the same template never collide.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    model::{EdgeModel, NodeModel, TemplateInstance, WorkflowTemplate},
    utils,
    workflow::{Graph, catalog},
};

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<WorkflowTemplate>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<WorkflowTemplate>) -> Self {
        Self {
            templates,
        }
    }

    /// Registry holding the bundled automations.
    pub fn builtin() -> Self {
        Self::new(catalog::builtin_templates())
    }

    /// get template by id
    pub fn get(
        &self,
        id: &str,
    ) -> Option<&WorkflowTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    pub fn by_category(
        &self,
        category: &str,
    ) -> Vec<&WorkflowTemplate> {
        self.templates.iter().filter(|t| t.category == category).collect()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for template in self.templates.iter() {
            if !categories.contains(&template.category.as_str()) {
                categories.push(template.category.as_str());
            }
        }
        categories
    }

    /// Deep copy of a template with fresh node and edge ids.
    ///
    /// Edge endpoints are remapped to the new node ids. An endpoint that is not
    /// a node of the template keeps its original value.
    pub fn instantiate(
        &self,
        id: &str,
    ) -> Option<TemplateInstance> {
        let template = self.get(id)?;

        let ids: HashMap<&str, String> = template.nodes.iter().map(|n| (n.id.as_str(), utils::node_id())).collect();
        let remap = |old: &String| ids.get(old.as_str()).cloned().unwrap_or_else(|| old.clone());

        let nodes = template
            .nodes
            .iter()
            .map(|n| NodeModel {
                id: remap(&n.id),
                selected: false,
                dragging: false,
                ..n.clone()
            })
            .collect();
        let edges = template
            .edges
            .iter()
            .map(|e| EdgeModel {
                id: utils::edge_id(),
                source: remap(&e.source),
                target: remap(&e.target),
                selected: false,
                ..e.clone()
            })
            .collect();

        trace!("template::instantiate({})", id);
        Some(TemplateInstance {
            name: template.name.clone(),
            description: template.description.clone(),
            nodes,
            edges,
        })
    }

    /// Replace the graph's contents with a fresh copy of template `id`.
    ///
    /// Returns `false` and leaves the graph untouched when `id` is unknown.
    pub fn load_template(
        &self,
        graph: &mut Graph,
        id: &str,
    ) -> bool {
        match self.instantiate(id) {
            Some(instance) => {
                graph.load(instance);
                true
            }
            None => {
                debug!("template {} not found, graph left unchanged", id);
                false
            }
        }
    }
}
