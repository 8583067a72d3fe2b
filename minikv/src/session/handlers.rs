use crate::config::Config;
use crate::core::KVStore;
use crate::persistence::{self, Record, Result, WriteAheadLog};

/// Owned session state: the cache plus the open log handle.
///
/// Nothing here is process-global, so independent stores can coexist in
/// one process (and one test binary).
pub struct AppState {
    pub kv_store: KVStore,
    wal: Option<WriteAheadLog>,
}

impl AppState {
    /// Open the store, replaying the log into a fresh cache
    pub fn open(config: &Config) -> Result<Self> {
        let (kv_store, wal) = persistence::recover(&config.storage)?;
        Ok(Self { kv_store, wal })
    }

    /// Durably log a write, then apply it to the cache.
    ///
    /// Ordering is the durability contract: the record is fsynced before
    /// the cache changes, and on a failed append the cache is left
    /// untouched for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let record = Record::new(key, value)?;
        if let Some(wal) = self.wal.as_mut() {
            wal.append(&record)?;
        }

        let Record { key, value } = record;
        self.kv_store.set(&key, value);
        Ok(())
    }

    /// Read the current value from the cache
    pub fn get(&self, key: &str) -> Option<String> {
        self.kv_store.get(key)
    }

    /// Whether writes are being persisted
    pub fn is_durable(&self) -> bool {
        self.wal.is_some()
    }
}
