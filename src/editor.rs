//! Workflow editor - the main entry point for Flowdeck.
//!
//! An editor owns one [`Graph`] and connects the pieces around it:
//! - Loading templates from an injected [`TemplateRegistry`]
//! - Compiling the graph on save
//! - Pushing the compiled document through a [`SyncClient`]
//! - Recording sync status in a shared [`SyncRegistry`]

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    FlowError, Result,
    model::CompiledDocument,
    sync::{Paging, RemoteWorkflow, SyncClient, SyncRecord, SyncRegistry, SyncState},
    utils,
    workflow::{Graph, TemplateRegistry, compile},
};

/// One workflow being edited and synced.
///
/// # Example
///
/// ```rust,ignore
/// let mut editor = EditorBuilder::new().config(config).build()?;
/// editor.load_template("welcome-email");
/// let remote_id = editor.save().await?;
/// editor.execute(serde_json::json!({})).await?;
/// ```
pub struct Editor {
    /// Local reference for sync status, independent of the engine id.
    key: String,
    /// Engine id once the workflow has been created remotely.
    remote_id: Option<String>,
    graph: Graph,
    templates: Arc<TemplateRegistry>,
    client: Arc<SyncClient>,
    status: Arc<SyncRegistry>,
}

impl Editor {
    pub fn new(
        templates: Arc<TemplateRegistry>,
        client: Arc<SyncClient>,
        status: Arc<SyncRegistry>,
    ) -> Self {
        Self {
            key: utils::longid(),
            remote_id: None,
            graph: Graph::new(),
            templates,
            client,
            status,
        }
    }

    /// Bind to a workflow that already exists on the engine.
    pub fn with_remote_id(
        mut self,
        remote_id: impl Into<String>,
    ) -> Self {
        self.remote_id = Some(remote_id.into());
        self
    }

    /// Start from an existing graph instead of an empty one.
    pub fn with_graph(
        mut self,
        graph: Graph,
    ) -> Self {
        self.graph = graph;
        self.status.mark_stale(&self.key);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph. The last sync becomes stale.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.status.mark_stale(&self.key);
        &mut self.graph
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn sync_state(&self) -> SyncState {
        self.status.state(&self.key)
    }

    pub fn sync_record(&self) -> SyncRecord {
        self.status.record(&self.key)
    }

    /// Replace the graph with a fresh copy of a template.
    ///
    /// Unknown ids leave everything untouched, including sync state.
    pub fn load_template(
        &mut self,
        id: &str,
    ) -> bool {
        let loaded = self.templates.load_template(&mut self.graph, id);
        if loaded {
            self.status.mark_stale(&self.key);
        }
        loaded
    }

    /// Reset to an empty workflow. The engine binding is kept, so the next
    /// save overwrites the remote workflow with the empty one.
    pub fn clear_workflow(&mut self) {
        self.graph.clear_workflow();
        self.status.mark_stale(&self.key);
    }

    pub fn compile(&self) -> CompiledDocument {
        compile(&self.graph)
    }

    /// Compile and push the graph, creating the remote workflow on first save.
    ///
    /// Returns the engine id. Failures are recorded as the `error` state and
    /// returned unchanged; calling `save` again retries.
    pub async fn save(&mut self) -> Result<String> {
        let document = self.compile();
        self.status.begin(&self.key);

        let result = match &self.remote_id {
            Some(id) => self.client.update_workflow(id, &document).await,
            None => self.client.create_workflow(&document).await,
        };

        match result {
            Ok(remote) => {
                debug!("workflow {} synced as {}", self.key, remote.id);
                self.status.succeed(&self.key, &remote.id);
                self.remote_id = Some(remote.id.clone());
                Ok(remote.id)
            }
            Err(err) => {
                warn!("workflow {} failed to sync: {}", self.key, err);
                self.status.fail(&self.key, err.to_string());
                Err(err)
            }
        }
    }

    pub async fn execute(
        &self,
        trigger_data: Value,
    ) -> Result<Value> {
        self.client.execute_workflow(self.require_remote_id()?, trigger_data).await
    }

    pub async fn fetch(&self) -> Result<RemoteWorkflow> {
        self.client.get_workflow(self.require_remote_id()?).await
    }

    pub async fn executions(
        &self,
        paging: Paging,
    ) -> Result<Value> {
        self.client.get_workflow_executions(self.require_remote_id()?, paging).await
    }

    /// Delete the remote workflow. The local graph is kept and becomes unsynced.
    pub async fn delete(&mut self) -> Result<Value> {
        let ack = self.client.delete_workflow(self.require_remote_id()?).await?;
        self.remote_id = None;
        self.status.forget(&self.key);
        Ok(ack)
    }

    fn require_remote_id(&self) -> Result<&str> {
        self.remote_id.as_deref().ok_or_else(|| FlowError::Workflow("workflow has not been saved to the engine".to_string()))
    }
}
