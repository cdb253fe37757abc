use std::sync::Arc;

use crate::{
    Config, Editor, Result,
    sync::{CredentialSource, SyncClient, SyncRegistry},
    workflow::TemplateRegistry,
};

/// Assembles an [`Editor`] from configuration and optional shared parts.
///
/// Editors that should share a template catalog, status registry or client
/// are built with the same `Arc`s.
#[derive(Default)]
pub struct EditorBuilder {
    config: Config,
    templates: Option<Arc<TemplateRegistry>>,
    credentials: Option<Arc<dyn CredentialSource>>,
    client: Option<Arc<SyncClient>>,
    status: Option<Arc<SyncRegistry>>,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn templates(
        mut self,
        templates: Arc<TemplateRegistry>,
    ) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Ignored when a prebuilt client is supplied.
    pub fn credentials(
        mut self,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn client(
        mut self,
        client: Arc<SyncClient>,
    ) -> Self {
        self.client = Some(client);
        self
    }

    pub fn status(
        mut self,
        status: Arc<SyncRegistry>,
    ) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(&self) -> Result<Editor> {
        let client = match &self.client {
            Some(client) => client.clone(),
            None => {
                let mut client = SyncClient::new(&self.config.engine)?;
                if let Some(credentials) = &self.credentials {
                    client = client.with_credentials(credentials.clone());
                }
                Arc::new(client)
            }
        };
        let templates = self.templates.clone().unwrap_or_else(|| Arc::new(TemplateRegistry::builtin()));
        let status = self.status.clone().unwrap_or_else(|| Arc::new(SyncRegistry::new(self.config.status_capacity)));

        Ok(Editor::new(templates, client, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlowError, sync::SyncState};

    #[test]
    fn test_build_with_defaults() {
        let editor = EditorBuilder::new().build().unwrap();
        assert_eq!(editor.templates().list().len(), 4);
        assert_eq!(editor.sync_state(), SyncState::Unsynced);
    }

    #[test]
    fn test_shared_status_registry() {
        let status = Arc::new(SyncRegistry::new(8));
        let builder = EditorBuilder::new().status(status.clone());
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();

        assert_ne!(first.key(), second.key());
        status.begin(first.key());
        assert_eq!(first.sync_state(), SyncState::Syncing);
        assert_eq!(second.sync_state(), SyncState::Unsynced);
    }

    #[test]
    fn test_build_rejects_bad_base_url() {
        let mut config = Config::default();
        config.engine.base_url = "::".to_string();
        let err = EditorBuilder::new().config(config).build().err().unwrap();
        assert!(matches!(err, FlowError::Config(_)));
    }
}
