//! Shot map extraction.

use crate::models::{MatchEvent, ShotMarker, SHOT};

/// Collect shots for a shot map.
///
/// `team` limits the list to one side. Shots by `mirror_team` are flipped
/// across the halfway line so both sides attack the same goal on screen.
/// Shots without a location cannot be placed and are skipped.
pub fn extract_shots(
    events: &[MatchEvent],
    team: Option<&str>,
    mirror_team: Option<&str>,
) -> Vec<ShotMarker> {
    events
        .iter()
        .filter(|e| e.is_type(SHOT))
        .filter(|e| team.map_or(true, |t| e.team_name() == Some(t)))
        .filter_map(|e| {
            let location = e.location?;
            let mirrored = mirror_team.is_some() && e.team_name() == mirror_team;
            Some(ShotMarker {
                id: e.id.clone(),
                player: e.player_name().map(str::to_string),
                team: e.team_name().map(str::to_string),
                location: if mirrored {
                    location.mirrored_x()
                } else {
                    location
                },
                outcome: e
                    .shot
                    .as_ref()
                    .and_then(|s| s.outcome_name())
                    .map(str::to_string),
                xg: e.shot.as_ref().map_or(0.0, |s| s.expected_goals()),
                minute: e.minute,
            })
        })
        .collect()
}
