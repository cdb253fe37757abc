//! Sync facade: pushes compiled documents to the external engine and tracks
//! a coarse per-workflow status.

mod client;
mod credential;
mod models;
mod query;
mod state;

pub use client::SyncClient;
pub use credential::{CredentialSource, StaticCredential};
pub use models::{ApiKeyType, AuthorizationConfig, AuthorizationType, RemoteWorkflow};
pub use query::{Paging, WorkflowQuery};
pub use state::{DEFAULT_STATUS_CAPACITY, SyncRecord, SyncRegistry, SyncState};
