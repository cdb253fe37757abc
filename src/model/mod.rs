mod document;
mod edge;
mod node;
mod template;

pub use document::{CompiledDocument, ConnectionGroup, ConnectionTarget, ConnectionType, ExternalNode};
pub use edge::{Connection, EdgeId, EdgeModel};
pub use node::{NodeData, NodeDataPatch, NodeDescriptor, NodeId, NodeModel, Position};
pub use template::{TemplateInstance, WorkflowTemplate};
