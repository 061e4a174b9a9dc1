//! Durable, date-partitioned event persistence.
//!
//! All persister state lives in the filesystem layout: one subdirectory
//! per calendar date (`YYYYMMDD`) under the logs root, one JSON file per
//! event named by a sub-second timestamp. Requests are independent; any
//! number of them can persist concurrently without shared in-memory state.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use vitrine_core::EventRecord;

/// Upper bound on collision-suffix attempts for one event.
///
/// Hitting this would mean a thousand events landed on the same
/// millisecond; at the expected request rate that is a broken clock, not
/// load.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Errors surfaced by [`EventPersister::persist`].
///
/// Each failure affects only its own request; the process keeps serving.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Date-partition directory could not be created.
    #[error("failed to create log partition {path}: {source}")]
    CreatePartition {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Event file could not be created or written.
    #[error("failed to write event file {path}: {source}")]
    WriteEvent {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Normalized record could not be encoded.
    #[error("failed to encode event record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Every candidate filename was already taken.
    #[error("no free event filename after {MAX_NAME_ATTEMPTS} attempts in {path}")]
    NamesExhausted { path: PathBuf },
}

/// The on-disk shape of one event: the server-assigned timestamp plus the
/// normalized record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Persistence time as `YYYYMMDDHHMMSS`, assigned by the server.
    pub timestamp: String,
    #[serde(flatten)]
    pub record: EventRecord,
}

/// Writes each incoming event to a uniquely named file under a
/// date-partitioned directory tree.
#[derive(Debug, Clone)]
pub struct EventPersister {
    root: PathBuf,
}

impl EventPersister {
    /// Create a persister rooted at `root`, creating the directory if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| PersistError::CreatePartition {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The logs root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the logs root currently accepts writes.
    ///
    /// Used by the readiness probe: creates and removes a probe file.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        let probe = self.root.join(".readiness-probe");
        match fs::write(&probe, b"ok") {
            Ok(()) => {
                let _ = fs::remove_file(&probe);
                true
            }
            Err(_) => false,
        }
    }

    /// Normalize `payload` and write it durably.
    ///
    /// Malformed payloads are never rejected; missing required fields are
    /// stored as explicit sentinels. Only I/O failures error.
    ///
    /// Returns the path of the stored file relative to the logs root
    /// (`<partition>/<filename>`).
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the partition cannot be created or the
    /// file cannot be written.
    pub fn persist(&self, payload: &Value) -> Result<String, PersistError> {
        self.persist_at(payload, Local::now())
    }

    /// Persist with an explicit clock reading. Split out so collision
    /// handling can be exercised deterministically.
    fn persist_at(&self, payload: &Value, now: DateTime<Local>) -> Result<String, PersistError> {
        let partition = now.format("%Y%m%d").to_string();
        let timestamp = now.format("%Y%m%d%H%M%S").to_string();
        let millis = now.timestamp_subsec_millis();

        let dir = self.root.join(&partition);
        // Idempotent under concurrent callers racing to create the same
        // date partition.
        fs::create_dir_all(&dir).map_err(|source| PersistError::CreatePartition {
            path: dir.clone(),
            source,
        })?;

        let stored = StoredEvent {
            timestamp: timestamp.clone(),
            record: EventRecord::from_payload(payload),
        };
        let body = serde_json::to_vec_pretty(&stored)?;

        let stem = format!("{timestamp}{millis:03}");
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = if attempt == 0 {
                format!("{stem}.json")
            } else {
                format!("{stem}-{attempt}.json")
            };
            let path = dir.join(&filename);

            // create_new makes the existence check and the creation one
            // atomic filesystem operation, so two events landing in the
            // same millisecond can never overwrite each other.
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(PersistError::WriteEvent { path, source }),
            };

            if let Err(source) = file.write_all(&body) {
                // Don't leave a truncated record behind for readers.
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(PersistError::WriteEvent { path, source });
            }

            let relative = format!("{partition}/{filename}");
            tracing::info!(file = %relative, "event persisted");
            return Ok(relative);
        }

        Err(PersistError::NamesExhausted { path: dir })
    }
}
