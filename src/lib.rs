//! # Flowdeck
//!
//! Flowdeck is the workflow graph layer of an automation dashboard. It keeps an
//! editable graph of automation steps, instantiates pre-built templates, and
//! compiles the graph into the document format of an external workflow
//! engine, which it then keeps in sync over HTTP.
//!
//! ## Core Features
//!
//! - **Graph Store**: ordered node and edge lists with atomic edit operations
//! - **Templates**: an injected, read-only catalog; every load gets fresh ids
//! - **Compiler**: pure and total translation to the engine schema
//! - **Sync**: create/update/execute/delete against the engine, with 401 kept
//!   distinct from other failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowdeck::{Config, EditorBuilder};
//!
//! let config = Config::create("flowdeck.toml")?;
//! let mut editor = EditorBuilder::new().config(config).build()?;
//!
//! editor.load_template("daily-report");
//! let document = editor.compile();
//! let remote_id = editor.save().await?;
//! ```

mod builder;
mod common;
mod config;
mod editor;
mod error;
pub mod model;
pub mod sync;
mod utils;
pub mod workflow;

pub use builder::EditorBuilder;
pub use config::{Config, EngineConfig};
pub use editor::Editor;
pub use error::FlowError;
pub use model::*;
pub use workflow::{Graph, TemplateRegistry, compile};

/// Result type alias for Flowdeck operations.
pub type Result<T> = std::result::Result<T, FlowError>;
