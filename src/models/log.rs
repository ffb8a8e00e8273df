//! Ordered event log for one match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MatchEvent, MatchInfo};

/// Home and away teams could not be settled for a log.
#[derive(Debug, Error, PartialEq)]
pub enum SideError {
    #[error("cannot determine home and away teams")]
    Undetermined,

    #[error("home and away are both {0}")]
    SameTeam(String),
}

/// The full, ordered event stream of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchEventLog {
    events: Vec<MatchEvent>,
}

/// Read-only overview of a log, used to populate team and event-type pickers.
#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
    pub event_count: usize,
    pub teams: Vec<String>,
    pub event_types: BTreeMap<String, usize>,
    pub last_minute: i32,
}

impl MatchEventLog {
    pub fn new(events: Vec<MatchEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchEvent> {
        self.events.iter()
    }

    /// Distinct team names, in order of first appearance.
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for name in self.events.iter().filter_map(|e| e.team_name()) {
            if !teams.iter().any(|t| t == name) {
                teams.push(name.to_string());
            }
        }
        teams
    }

    /// Settle the home and away teams.
    ///
    /// Each side takes the explicit name first, then the fixture header, then
    /// the first team seen in the log. Fallbacks never repeat the team already
    /// chosen for the other side; only two explicit equal names are rejected.
    pub fn resolve_sides(
        &self,
        home: Option<&str>,
        away: Option<&str>,
        fixture: Option<&MatchInfo>,
    ) -> Result<(String, String), SideError> {
        let seen = self.teams();
        let home = pick_side(home, fixture.map(|f| f.home_team_name()), away, &seen)
            .ok_or(SideError::Undetermined)?;
        let away = pick_side(away, fixture.map(|f| f.away_team_name()), Some(home), &seen)
            .ok_or(SideError::Undetermined)?;

        if home == away {
            return Err(SideError::SameTeam(home.to_string()));
        }
        Ok((home.to_string(), away.to_string()))
    }

    /// Event counts keyed by type name. Untyped records are not counted.
    pub fn event_type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for name in self.events.iter().filter_map(|e| e.type_name()) {
            *counts.entry(name.to_string()).or_default() += 1;
        }
        counts
    }

    /// Latest minute present in the log, 0 for a log without minutes.
    pub fn last_minute(&self) -> i32 {
        self.events
            .iter()
            .filter_map(|e| e.minute)
            .max()
            .unwrap_or(0)
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary {
            event_count: self.len(),
            teams: self.teams(),
            event_types: self.event_type_counts(),
            last_minute: self.last_minute(),
        }
    }
}

fn pick_side<'a>(
    explicit: Option<&'a str>,
    header: Option<&'a str>,
    other: Option<&str>,
    seen: &'a [String],
) -> Option<&'a str> {
    explicit
        .or(header.filter(|h| Some(*h) != other))
        .or_else(|| seen.iter().map(String::as_str).find(|t| Some(*t) != other))
}

impl From<Vec<MatchEvent>> for MatchEventLog {
    fn from(events: Vec<MatchEvent>) -> Self {
        Self::new(events)
    }
}

impl<'a> IntoIterator for &'a MatchEventLog {
    type Item = &'a MatchEvent;
    type IntoIter = std::slice::Iter<'a, MatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> MatchEventLog {
        MatchEventLog::new(vec![
            MatchEvent::new("Starting XI").with_team("Arsenal"),
            MatchEvent::new("Starting XI").with_team("Chelsea"),
            MatchEvent::new("Pass").with_team("Chelsea").with_minute(3),
            MatchEvent::new("Pass").with_team("Arsenal").with_minute(4),
            MatchEvent::new("Shot").with_team("Arsenal").with_minute(93),
            MatchEvent::new("Half End"),
        ])
    }

    #[test]
    fn test_teams_in_first_seen_order() {
        assert_eq!(sample_log().teams(), vec!["Arsenal", "Chelsea"]);
    }

    #[test]
    fn test_event_type_counts() {
        let counts = sample_log().event_type_counts();
        assert_eq!(counts.get("Pass"), Some(&2));
        assert_eq!(counts.get("Starting XI"), Some(&2));
        assert_eq!(counts.get("Shot"), Some(&1));
        assert_eq!(counts.get("Carry"), None);
    }

    #[test]
    fn test_last_minute() {
        assert_eq!(sample_log().last_minute(), 93);
        assert_eq!(MatchEventLog::default().last_minute(), 0);
    }

    #[test]
    fn test_summary() {
        let summary = sample_log().summary();
        assert_eq!(summary.event_count, 6);
        assert_eq!(summary.teams.len(), 2);
        assert_eq!(summary.last_minute, 93);
    }

    #[test]
    fn test_resolve_sides_from_log_order() {
        let sides = sample_log().resolve_sides(None, None, None);
        assert_eq!(sides, Ok(("Arsenal".to_string(), "Chelsea".to_string())));

        let sides = sample_log().resolve_sides(None, Some("Arsenal"), None);
        assert_eq!(sides, Ok(("Chelsea".to_string(), "Arsenal".to_string())));
    }

    #[test]
    fn test_resolve_sides_skips_fixture_team_already_chosen() {
        let fixture: MatchInfo = serde_json::from_str(
            r#"{"match_id": 1, "match_date": "2015-09-12",
                "home_team": {"home_team_name": "Arsenal"},
                "away_team": {"away_team_name": "Chelsea"}}"#,
        )
        .unwrap();
        let log = sample_log();

        assert_eq!(
            log.resolve_sides(None, None, Some(&fixture)),
            Ok(("Arsenal".to_string(), "Chelsea".to_string()))
        );
        assert_eq!(
            log.resolve_sides(Some("Chelsea"), None, Some(&fixture)),
            Ok(("Chelsea".to_string(), "Arsenal".to_string()))
        );
        assert_eq!(
            log.resolve_sides(None, Some("Arsenal"), Some(&fixture)),
            Ok(("Chelsea".to_string(), "Arsenal".to_string()))
        );
    }

    #[test]
    fn test_resolve_sides_errors() {
        assert_eq!(
            sample_log().resolve_sides(Some("Arsenal"), Some("Arsenal"), None),
            Err(SideError::SameTeam("Arsenal".to_string()))
        );

        let one_team = MatchEventLog::new(vec![MatchEvent::new("Pass").with_team("Arsenal")]);
        assert_eq!(
            one_team.resolve_sides(None, None, None),
            Err(SideError::Undetermined)
        );
        assert_eq!(
            MatchEventLog::default().resolve_sides(None, None, None),
            Err(SideError::Undetermined)
        );
    }

    #[test]
    fn test_deserializes_from_plain_array() {
        let json = r#"[{"id": "1", "type": {"name": "Pass"}}, {"id": "2"}]"#;
        let log: MatchEventLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].type_name(), Some("Pass"));
        assert_eq!(log.events()[1].type_name(), None);
    }
}
