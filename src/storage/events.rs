//! Event log and fixture loading.
//!
//! Source exports are best-effort, so loading is record-tolerant: a record
//! that does not fit the event shape is logged and dropped, and the rest of
//! the log is kept.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{JsonlReader, StorageConfig, StorageError};
use crate::models::{EventId, MatchEvent, MatchEventLog, MatchInfo};

/// Read an event log from a `.json` array or a `.jsonl` file.
pub fn read_event_log(path: &Path) -> Result<MatchEventLog, StorageError> {
    let numbered: Vec<(usize, MatchEvent)> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_json_array(path)?,
        Some("jsonl") => JsonlReader::new(path.to_path_buf()).read_numbered()?,
        _ => return Err(StorageError::UnknownFormat(path.to_path_buf())),
    };

    let events = numbered
        .into_iter()
        .map(|(position, mut event)| {
            if event.id.is_empty() {
                event.id = derive_event_id(position, &event);
            }
            event
        })
        .collect::<Vec<_>>();

    debug!("Loaded {} events from {:?}", events.len(), path);
    Ok(MatchEventLog::new(events))
}

/// Load the event log stored for `match_id`.
pub fn load_match(config: &StorageConfig, match_id: &str) -> Result<MatchEventLog, StorageError> {
    let path = config
        .event_log_path(match_id)
        .ok_or_else(|| StorageError::PathNotFound(config.events_dir().join(match_id)))?;
    read_event_log(&path)
}

/// Ids of all matches with an event log, sorted.
pub fn list_matches(config: &StorageConfig) -> Result<Vec<String>, StorageError> {
    let dir = config.events_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path: PathBuf = entry?.path();
        let is_log = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("json") | Some("jsonl")
        );
        if !is_log || !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.push(stem.to_string());
        }
    }

    ids.sort();
    ids.dedup();
    Ok(ids)
}

/// Read fixture headers. A missing fixtures file is an empty season.
pub fn read_fixtures(config: &StorageConfig) -> Result<Vec<MatchInfo>, StorageError> {
    let path = config.fixtures_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let fixtures: Vec<MatchInfo> = read_json_array(&path)?
        .into_iter()
        .map(|(_, fixture)| fixture)
        .collect();
    Ok(fixtures)
}

/// Find the fixture header for a match id.
pub fn find_fixture<'a>(fixtures: &'a [MatchInfo], match_id: &str) -> Option<&'a MatchInfo> {
    let id: u64 = match_id.parse().ok()?;
    fixtures.iter().find(|f| f.match_id == id)
}

/// Parse a top-level JSON array record by record, keeping 1-based positions.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>, StorageError> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<Value> = serde_json::from_str(&contents)?;

    let mut parsed = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let position = i + 1;
        match serde_json::from_value(record) {
            Ok(item) => parsed.push((position, item)),
            Err(e) => warn!("Skipping record {} in {:?}: {}", position, path, e),
        }
    }
    Ok(parsed)
}

fn derive_event_id(position: usize, event: &MatchEvent) -> EventId {
    let position = position.to_string();
    let minute = event.minute.map(|m| m.to_string()).unwrap_or_default();
    EventId::derive(&[&position, event.type_name().unwrap_or(""), &minute])
}
