//! Bounded in-memory key-value cache backed by moka.

use moka::sync::Cache;

/// Thread-safe in-memory cache with configurable capacity.
///
/// Used for the per-workflow sync records (`MemCache<String, SyncRecord>`).
/// Entries beyond capacity are evicted; readers must treat a miss as "never seen".
#[derive(Clone)]
pub struct MemCache<K, V> {
    entries: Cache<K, V>,
}

impl<K, V> MemCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Allocate a new [`MemCache`].
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Cache::new(capacity as u64),
        }
    }

    pub fn set(
        &self,
        key: K,
        value: V,
    ) {
        self.entries.insert(key, value);
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<V> {
        self.entries.get(key)
    }

    pub fn remove(
        &self,
        key: &K,
    ) {
        self.entries.remove(key);
    }

    /// Flush pending evictions so capacity is observable.
    #[cfg(test)]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}
