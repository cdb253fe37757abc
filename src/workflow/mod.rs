mod catalog;
pub mod changes;
pub mod compiler;
pub mod consts;
mod graph;
mod template;

pub use changes::{EdgeChange, NodeChange};
pub use compiler::compile;
pub use graph::Graph;
pub use template::TemplateRegistry;
