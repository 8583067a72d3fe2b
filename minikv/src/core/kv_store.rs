use super::types::KVStats;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory key-value cache.
///
/// The cache is a derived view of the append-only log: it is rebuilt by
/// replay at startup and mutated only after a write has been made durable.
/// Lookups and updates never fail.
#[derive(Clone, Default)]
pub struct KVStore {
    data: Arc<RwLock<HashMap<String, String>>>,
    stats: Arc<RwLock<KVStats>>,
}

impl KVStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key-value pair
    pub fn set(&self, key: &str, value: String) {
        debug!("SET key={}, size={}", key, value.len());

        let mut data = self.data.write();
        let is_new = data.insert(key.to_string(), value).is_none();

        let mut stats = self.stats.write();
        stats.sets += 1;
        if is_new {
            stats.total_keys += 1;
        }
    }

    /// Get the current value for a key
    pub fn get(&self, key: &str) -> Option<String> {
        debug!("GET key={}", key);

        let data = self.data.read();
        let mut stats = self.stats.write();
        stats.gets += 1;

        match data.get(key) {
            Some(value) => {
                stats.hits += 1;
                Some(value.clone())
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> KVStats {
        self.stats.read().clone()
    }
}
