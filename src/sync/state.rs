//! Coarse per-workflow sync status.
//!
//! ```text
//! unsynced --begin--> syncing --succeed--> synced
//!     ^                  |  ^                 |
//!     |                  |  +---begin-----+   |
//!     |                fail               |   |
//!     |                  v                |   |
//!     +--mark_stale--- error -------------+   |
//!     +--mark_stale---------------------------+
//! ```
//!
//! Transitions are recorded as they land. Two saves in flight for the same
//! workflow both write their outcome; the later write wins.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{common::MemCache, utils};

/// Default number of workflows whose sync status is remembered.
pub const DEFAULT_STATUS_CAPACITY: u64 = 1024;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, strum::AsRefStr)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SyncState {
    #[default]
    Unsynced,
    Syncing,
    Synced,
    Error(String),
}

impl SyncState {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SyncState::Error(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRecord {
    pub state: SyncState,
    /// Engine id from the last successful create or update.
    pub remote_id: Option<String>,
    /// Milliseconds since epoch of the last transition, 0 if never touched.
    pub update_time: i64,
}

/// Sync records keyed by local workflow key. A missing key reads as `unsynced`.
///
/// The registry holds at most `capacity` records. Past that, older records are
/// evicted and those workflows read as `unsynced` again until their next save,
/// even if they were `synced` or `error`. The remote id kept by [`crate::Editor`]
/// is unaffected.
#[derive(Clone)]
pub struct SyncRegistry {
    records: MemCache<String, SyncRecord>,
}

impl Default for SyncRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_CAPACITY)
    }
}

impl SyncRegistry {
    pub fn new(capacity: u64) -> Self {
        Self {
            records: MemCache::new(capacity as usize),
        }
    }

    pub fn record(
        &self,
        key: &str,
    ) -> SyncRecord {
        self.records.get(&key.to_string()).unwrap_or_default()
    }

    pub fn state(
        &self,
        key: &str,
    ) -> SyncState {
        self.record(key).state
    }

    /// A create or update has been sent.
    pub fn begin(
        &self,
        key: &str,
    ) {
        self.transition(key, SyncState::Syncing, None);
    }

    pub fn succeed(
        &self,
        key: &str,
        remote_id: &str,
    ) {
        self.transition(key, SyncState::Synced, Some(remote_id.to_string()));
    }

    pub fn fail(
        &self,
        key: &str,
        message: impl Into<String>,
    ) {
        self.transition(key, SyncState::Error(message.into()), None);
    }

    /// The local graph changed since the last sync. Keeps the remote id.
    pub fn mark_stale(
        &self,
        key: &str,
    ) {
        if self.state(key) != SyncState::Unsynced {
            self.transition(key, SyncState::Unsynced, None);
        }
    }

    pub fn forget(
        &self,
        key: &str,
    ) {
        self.records.remove(&key.to_string());
    }

    fn transition(
        &self,
        key: &str,
        state: SyncState,
        remote_id: Option<String>,
    ) {
        let mut record = self.record(key);
        trace!("sync::transition({}, {} -> {})", key, record.state.as_ref(), state.as_ref());
        record.state = state;
        if remote_id.is_some() {
            record.remote_id = remote_id;
        }
        record.update_time = utils::time::time_millis();
        self.records.set(key.to_string(), record);
    }
}
