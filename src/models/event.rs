//! Match event model.
//!
//! Mirrors the StatsBomb open-data event shape. Only the fields the
//! aggregation layer reads are modelled; everything else in a record is
//! ignored on load.

use serde::{Deserialize, Serialize};

use super::{EventId, Location};

pub const SHOT: &str = "Shot";
pub const PASS: &str = "Pass";
pub const FOUL_COMMITTED: &str = "Foul Committed";

/// Administrative event types that carry no possession information.
pub const ADMINISTRATIVE_TYPES: [&str; 4] =
    ["Starting XI", "Half Start", "Half End", "Substitution"];

/// Outcome name of a shot that scored.
pub const OUTCOME_GOAL: &str = "Goal";

/// Outcome name of a shot stopped by the keeper.
pub const OUTCOME_SAVED: &str = "Saved";

/// A `{ "id": .., "name": .. }` reference as used for types, teams and players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Shot-specific detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<NamedRef>,

    /// Expected goals value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statsbomb_xg: Option<f64>,
}

impl ShotDetail {
    pub fn outcome_name(&self) -> Option<&str> {
        self.outcome.as_ref().map(|o| o.name.as_str())
    }

    pub fn expected_goals(&self) -> f64 {
        self.statsbomb_xg.unwrap_or(0.0)
    }

    pub fn is_goal(&self) -> bool {
        self.outcome_name() == Some(OUTCOME_GOAL)
    }

    pub fn is_on_target(&self) -> bool {
        matches!(self.outcome_name(), Some(OUTCOME_GOAL) | Some(OUTCOME_SAVED))
    }
}

/// Pass-specific detail. An absent outcome means the pass was completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<NamedRef>,
}

impl PassDetail {
    pub fn outcome_name(&self) -> Option<&str> {
        self.outcome.as_ref().map(|o| o.name.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_none()
    }
}

/// One recorded action in a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(default)]
    pub id: EventId,

    /// Position in the source log, when the export provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possession_team: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<NamedRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotDetail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<PassDetail>,
}

impl MatchEvent {
    /// Create an event of the given type with every optional field empty.
    pub fn new(type_name: &str) -> Self {
        Self {
            id: EventId::default(),
            index: None,
            event_type: Some(NamedRef::new(type_name)),
            team: None,
            possession_team: None,
            player: None,
            location: None,
            minute: None,
            shot: None,
            pass: None,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.event_type.as_ref().map(|t| t.name.as_str())
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.name.as_str())
    }

    pub fn possession_team_name(&self) -> Option<&str> {
        self.possession_team.as_ref().map(|t| t.name.as_str())
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player.as_ref().map(|p| p.name.as_str())
    }

    /// Match minute, with a missing minute read as kick-off.
    pub fn minute_or_zero(&self) -> i32 {
        self.minute.unwrap_or(0)
    }

    pub fn is_type(&self, type_name: &str) -> bool {
        self.type_name() == Some(type_name)
    }

    pub fn is_administrative(&self) -> bool {
        self.type_name()
            .is_some_and(|t| ADMINISTRATIVE_TYPES.contains(&t))
    }

    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(NamedRef::new(team));
        self
    }

    pub fn with_possession_team(mut self, team: &str) -> Self {
        self.possession_team = Some(NamedRef::new(team));
        self
    }

    pub fn with_player(mut self, player: &str) -> Self {
        self.player = Some(NamedRef::new(player));
        self
    }

    pub fn with_location(mut self, x: f64, y: f64) -> Self {
        self.location = Some(Location::new(x, y));
        self
    }

    pub fn with_minute(mut self, minute: i32) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn with_shot(mut self, outcome: &str, xg: f64) -> Self {
        self.shot = Some(ShotDetail {
            outcome: Some(NamedRef::new(outcome)),
            statsbomb_xg: Some(xg),
        });
        self
    }

    /// Attach pass detail; `None` marks a completed pass.
    pub fn with_pass_outcome(mut self, outcome: Option<&str>) -> Self {
        self.pass = Some(PassDetail {
            outcome: outcome.map(NamedRef::new),
        });
        self
    }
}
