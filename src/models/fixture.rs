//! Fixture header model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Home side of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeTeam {
    pub home_team_name: String,
}

/// Away side of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwayTeam {
    pub away_team_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub name: String,
}

/// Header information for one match, as listed in a season's fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: u64,
    pub match_date: NaiveDate,
    pub home_team: HomeTeam,
    pub away_team: AwayTeam,

    #[serde(default)]
    pub home_score: Option<u32>,

    #[serde(default)]
    pub away_score: Option<u32>,

    #[serde(default)]
    pub stadium: Option<Stadium>,

    #[serde(default)]
    pub match_week: Option<u32>,
}

impl MatchInfo {
    pub fn home_team_name(&self) -> &str {
        &self.home_team.home_team_name
    }

    pub fn away_team_name(&self) -> &str {
        &self.away_team.away_team_name
    }

    pub fn stadium_name(&self) -> Option<&str> {
        self.stadium.as_ref().map(|s| s.name.as_str())
    }

    /// Score as shown in the match header, e.g. "2 : 1".
    /// Unplayed fixtures show "- : -".
    pub fn scoreline(&self) -> String {
        let show = |s: Option<u32>| s.map_or_else(|| "-".to_string(), |v| v.to_string());
        format!("{} : {}", show(self.home_score), show(self.away_score))
    }

    /// Long-form date, e.g. "12 September 2015".
    pub fn display_date(&self) -> String {
        self.match_date.format("%-d %B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "match_id": 3754171,
        "match_date": "2015-09-12",
        "kick_off": "15:00:00.000",
        "home_team": {"home_team_id": 1, "home_team_name": "Arsenal", "home_team_gender": "male"},
        "away_team": {"away_team_id": 46, "away_team_name": "Stoke City"},
        "home_score": 2,
        "away_score": 0,
        "match_week": 5,
        "stadium": {"id": 1, "name": "Emirates Stadium"}
    }"#;

    #[test]
    fn test_deserialize_fixture() {
        let info: MatchInfo = serde_json::from_str(FIXTURE).unwrap();

        assert_eq!(info.match_id, 3754171);
        assert_eq!(info.home_team_name(), "Arsenal");
        assert_eq!(info.away_team_name(), "Stoke City");
        assert_eq!(info.stadium_name(), Some("Emirates Stadium"));
        assert_eq!(info.match_week, Some(5));
    }

    #[test]
    fn test_scoreline() {
        let mut info: MatchInfo = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(info.scoreline(), "2 : 0");

        info.home_score = None;
        info.away_score = None;
        assert_eq!(info.scoreline(), "- : -");
    }

    #[test]
    fn test_display_date() {
        let info: MatchInfo = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(info.display_date(), "12 September 2015");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "match_id": 1,
            "match_date": "2016-05-15",
            "home_team": {"home_team_name": "Watford"},
            "away_team": {"away_team_name": "Sunderland"}
        }"#;
        let info: MatchInfo = serde_json::from_str(json).unwrap();

        assert!(info.stadium_name().is_none());
        assert!(info.match_week.is_none());
        assert_eq!(info.display_date(), "15 May 2016");
    }
}
