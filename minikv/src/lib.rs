pub mod config;
pub mod core;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use config::{Config, LoggingConfig};
pub use core::{KVStats, KVStore};
pub use persistence::{
    PersistenceError, Record, RecoveryMode, WalConfig, WriteAheadLog, recover,
};
pub use session::{AppState, Command};
