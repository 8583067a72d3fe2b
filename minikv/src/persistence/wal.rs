use super::types::{PersistenceError, Record, RecoveryMode, Result, WalConfig};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, error, info};

/// Append-only log of writes; the sole source of truth for recovery.
///
/// The file is opened once and held for the life of the process. Every
/// append is flushed and fsynced before the call returns, so a successful
/// return means the record survives a subsequent crash.
pub struct WriteAheadLog {
    file: BufWriter<File>,
    config: WalConfig,
}

impl WriteAheadLog {
    /// Create or open the log file in append mode
    pub fn open(config: WalConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        info!("Log opened at {:?}", config.path);

        Ok(Self {
            file: BufWriter::new(file),
            config,
        })
    }

    /// Durably append one record.
    ///
    /// The record is on stable storage when this returns `Ok`; the caller
    /// must not apply the write to the cache before that.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        debug!("append: key={}, value_len={}", record.key, record.value.len());

        self.file.write_all(record.to_line().as_bytes())?;
        self.file.flush()?;
        self.file.get_ref().sync_all()?;

        Ok(())
    }

    /// Replay the log in file order.
    ///
    /// Later records overwrite earlier ones for the same key when applied.
    pub fn replay(&self) -> Result<Vec<Record>> {
        Self::replay_path(&self.config.path, self.config.recovery_mode)
    }

    /// Replay an arbitrary log path. A missing file is a normal first
    /// startup and yields no records. Unparseable lines are skipped. Read
    /// errors follow the recovery mode: tolerant keeps what was
    /// accumulated, strict aborts.
    pub fn replay_path(path: &Path, mode: RecoveryMode) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        if !path.exists() {
            debug!("No log file at {:?}, starting empty", path);
            return Ok(records);
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                if mode == RecoveryMode::Strict {
                    return Err(e.into());
                }
                error!("Error opening log file {:?}: {}", path, e);
                return Ok(records);
            }
        };

        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    if mode == RecoveryMode::Strict {
                        return Err(PersistenceError::RecoveryFailed(format!(
                            "read error after {} records: {}",
                            records.len(),
                            e
                        )));
                    }
                    error!("Error reading log file {:?}: {}", path, e);
                    break;
                }
            };

            if let Some(record) = Record::parse(&line) {
                records.push(record);
            } else if !line.trim().is_empty() {
                debug!("Skipping unparseable log line ({} bytes)", line.len());
            }
        }

        Ok(records)
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
