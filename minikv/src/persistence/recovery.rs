use super::types::{Result, WalConfig};
use super::wal::WriteAheadLog;
use crate::core::KVStore;
use tracing::info;

/// Rebuild the in-memory store from the log.
///
/// Returns the populated store and the open log handle. With persistence
/// disabled the store starts empty and no log handle is returned.
pub fn recover(config: &WalConfig) -> Result<(KVStore, Option<WriteAheadLog>)> {
    if !config.enabled {
        info!("Persistence disabled, starting with fresh state");
        return Ok((KVStore::new(), None));
    }

    info!("Starting recovery from {:?}", config.path);

    let wal = WriteAheadLog::open(config.clone())?;
    let store = KVStore::new();

    let records = wal.replay()?;
    let replayed = records.len();
    for record in records {
        store.set(&record.key, record.value);
    }

    info!(
        "Recovery complete. Replayed {} records into {} keys",
        replayed,
        store.len()
    );

    Ok((store, Some(wal)))
}
