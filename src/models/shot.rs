//! Shot map markers.

use serde::{Deserialize, Serialize};

use super::{EventId, Location, OUTCOME_GOAL};

/// A single shot, positioned for display on a shot map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotMarker {
    pub id: EventId,
    pub player: Option<String>,
    pub team: Option<String>,

    /// Display position, mirrored for the away side
    pub location: Location,
    pub outcome: Option<String>,
    pub xg: f64,
    pub minute: Option<i32>,
}

impl ShotMarker {
    pub fn is_goal(&self) -> bool {
        self.outcome.as_deref() == Some(OUTCOME_GOAL)
    }

    /// Whether the shot has happened by `minute`.
    pub fn visible_at(&self, minute: i32) -> bool {
        self.minute.unwrap_or(0) <= minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(outcome: Option<&str>, minute: Option<i32>) -> ShotMarker {
        ShotMarker {
            id: EventId::from("s"),
            player: None,
            team: Some("Arsenal".to_string()),
            location: Location::new(100.0, 40.0),
            outcome: outcome.map(str::to_string),
            xg: 0.2,
            minute,
        }
    }

    #[test]
    fn test_is_goal() {
        assert!(marker(Some("Goal"), None).is_goal());
        assert!(!marker(Some("Saved"), None).is_goal());
        assert!(!marker(None, None).is_goal());
    }

    #[test]
    fn test_visible_at() {
        let shot = marker(None, Some(30));
        assert!(!shot.visible_at(29));
        assert!(shot.visible_at(30));
        assert!(shot.visible_at(90));

        // Unknown minute counts as kick-off
        assert!(marker(None, None).visible_at(0));
    }
}
