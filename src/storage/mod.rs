//! Filesystem data directory.
//!
//! Layout:
//! - `events/<match_id>.json` (or `.jsonl`): one event log per match
//! - `fixtures.json`: fixture headers for the season

mod events;
mod jsonl;

pub use events::*;
pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Unsupported event log format: {0}")]
    UnknownFormat(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn events_dir(&self) -> PathBuf {
        self.data_dir.join("events")
    }

    pub fn fixtures_path(&self) -> PathBuf {
        self.data_dir.join("fixtures.json")
    }

    /// Path of a match's event log, preferring `.json` over `.jsonl`.
    pub fn event_log_path(&self, match_id: &str) -> Option<PathBuf> {
        let dir = self.events_dir();
        ["json", "jsonl"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", match_id, ext)))
            .find(|p| p.is_file())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
