use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// On-disk marker for a write record. The log format is plain text, one
/// record per line, and must stay compatible with existing data files.
pub const SET_MARKER: &str = "SET";

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid key {0:?}: keys must be non-empty and contain no whitespace")]
    InvalidKey(String),

    #[error("invalid value: line breaks are not representable in the log")]
    InvalidValue,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("recovery failed: {0}")]
    RecoveryFailed(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// One logged write: `SET <key> <value>\n` on disk.
///
/// The value is the remainder of the line and may contain spaces; it is
/// not escaped or quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    /// Build a record, rejecting anything that would corrupt the line
    /// grammar: empty keys, keys containing whitespace, values containing
    /// line breaks.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(PersistenceError::InvalidKey(key));
        }
        let value = value.into();
        if value.contains(['\n', '\r']) {
            return Err(PersistenceError::InvalidValue);
        }
        Ok(Self { key, value })
    }

    /// Parse one log line. Returns `None` for anything that is not a
    /// well-formed record (e.g. a truncated trailing line after a crash);
    /// replay skips such lines rather than aborting.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix(SET_MARKER)?;
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            return None;
        }
        let rest = rest.trim_start();
        let split = rest.find(char::is_whitespace)?;
        let key = &rest[..split];
        let value = rest[split..].trim_start();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Serialized line form, terminator included
    pub(crate) fn to_line(&self) -> String {
        format!("{} {} {}\n", SET_MARKER, self.key, self.value)
    }
}

/// Policy for read errors encountered while replaying the log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryMode {
    /// Report the error and keep whatever was replayed so far
    #[default]
    Tolerant,
    /// Abort recovery on the first read error
    Strict,
}

/// Write-ahead log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub recovery_mode: RecoveryMode,
}

impl Default for WalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("./data/minikv.log"),
            recovery_mode: RecoveryMode::Tolerant,
        }
    }
}
