use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::ApiError;
use crate::config::AppConfig;
use crate::models::{MatchEventLog, MatchInfo, TeamDirectory};
use crate::storage::{self, StorageConfig};

/// Parsed event logs keyed by match id. Logs are immutable once loaded.
pub type LogCache = Arc<RwLock<HashMap<String, Arc<MatchEventLog>>>>;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub config: Arc<AppConfig>,
    pub teams: Arc<TeamDirectory>,
    pub fixtures: Arc<Vec<MatchInfo>>,
    pub logs: LogCache,
}

impl AppState {
    /// Build state from configuration, reading the fixture list once.
    pub fn load(config: AppConfig) -> anyhow::Result<Self> {
        let storage = StorageConfig::new(config.data_dir.clone());
        let teams = config.team_directory()?;
        let fixtures = storage::read_fixtures(&storage)?;
        tracing::info!("Loaded {} fixtures", fixtures.len());

        Ok(Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
            teams: Arc::new(teams),
            fixtures: Arc::new(fixtures),
            logs: LogCache::default(),
        })
    }

    /// Event log for a match, parsed on first use and cached afterwards.
    pub async fn event_log(&self, match_id: &str) -> Result<Arc<MatchEventLog>, ApiError> {
        validate_match_id(match_id)?;

        if let Some(log) = self.logs.read().await.get(match_id) {
            return Ok(Arc::clone(log));
        }

        let log = Arc::new(storage::load_match(&self.storage, match_id)?);
        tracing::debug!("Cached event log for match {} ({} events)", match_id, log.len());

        let mut cache = self.logs.write().await;
        let entry = cache
            .entry(match_id.to_string())
            .or_insert_with(|| Arc::clone(&log));
        Ok(Arc::clone(entry))
    }

    pub fn fixture(&self, match_id: &str) -> Option<&MatchInfo> {
        storage::find_fixture(&self.fixtures, match_id)
    }
}

/// Match ids name files under the events directory, so only plain
/// identifier characters are accepted.
fn validate_match_id(match_id: &str) -> Result<(), ApiError> {
    let valid = !match_id.is_empty()
        && match_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("invalid match id: {}", match_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_match_id() {
        assert!(validate_match_id("3754171").is_ok());
        assert!(validate_match_id("pl-2015_16").is_ok());
        assert!(validate_match_id("").is_err());
        assert!(validate_match_id("../secrets").is_err());
        assert!(validate_match_id("a/b").is_err());
        assert!(validate_match_id("a.json").is_err());
    }

    #[tokio::test]
    async fn test_event_log_is_cached() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::load(config).unwrap();
        std::fs::create_dir_all(state.storage.events_dir()).unwrap();
        let path = state.storage.events_dir().join("1.json");
        std::fs::write(&path, r#"[{"id": "a", "type": {"name": "Pass"}}]"#).unwrap();

        let first = state.event_log("1").await.unwrap();
        // Later edits are not seen once the log is cached
        std::fs::write(&path, "[]").unwrap();
        let second = state.event_log("1").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_event_log_missing_match() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::load(config).unwrap();

        assert!(matches!(
            state.event_log("42").await,
            Err(ApiError::NotFound(_))
        ));
    }
}
