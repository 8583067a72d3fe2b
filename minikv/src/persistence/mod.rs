/// Persistence module
///
/// Provides durability for the key-value store through an append-only
/// text log: every write is fsynced before it is acknowledged, and the
/// log replayed in order reconstructs the store after a restart.
pub mod recovery;
pub mod types;
pub mod wal;

pub use recovery::recover;
pub use types::{PersistenceError, Record, RecoveryMode, Result, WalConfig};
pub use wal::WriteAheadLog;
