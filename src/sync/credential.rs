//! Where the engine credential comes from.
//!
//! Obtaining or refreshing tokens happens outside this crate; implementors
//! only hand over whatever secret is current.

use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// The secret to send, or `None` when no credential is available.
    async fn api_key(&self) -> Result<Option<String>>;
}

/// A credential fixed at construction, typically read from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential {
    api_key: Option<String>,
}

impl StaticCredential {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
        }
    }
}

#[async_trait]
impl CredentialSource for StaticCredential {
    async fn api_key(&self) -> Result<Option<String>> {
        Ok(self.api_key.clone())
    }
}
