//! Match statistics reduction.

use tracing::trace;

use super::percentage;
use crate::models::{MatchEvent, MatchStatsBundle, Side, SidePair, FOUL_COMMITTED, PASS, SHOT};

/// Possession share reported when no event carries a recognised possession team.
const NEUTRAL_POSSESSION: u32 = 50;

/// Pass completion reported for a side with no attempted passes.
const NO_PASS_COMPLETION: u32 = 0;

/// Reduces an event log to per-team statistics.
pub struct MatchStatsReducer;

impl MatchStatsReducer {
    /// Tally the match statistics for `home` and `away`.
    ///
    /// Events attributed to any other team, or to no team, are ignored.
    pub fn reduce(events: &[MatchEvent], home: &str, away: &str) -> MatchStatsBundle {
        let side_of = |team: Option<&str>| match team {
            Some(t) if t == home => Some(Side::Home),
            Some(t) if t == away => Some(Side::Away),
            _ => None,
        };

        let mut bundle = MatchStatsBundle::default();
        let mut possession_events = SidePair::<u32>::default();
        let mut passes_complete = SidePair::<u32>::default();

        for event in events {
            if !event.is_administrative() {
                if let Some(side) = side_of(event.possession_team_name()) {
                    *possession_events.get_mut(side) += 1;
                }
            }

            let Some(side) = side_of(event.team_name()) else {
                continue;
            };

            match event.type_name() {
                Some(SHOT) => {
                    *bundle.shots.get_mut(side) += 1;
                    if let Some(shot) = &event.shot {
                        *bundle.expected_goals.get_mut(side) += shot.expected_goals();
                        if shot.is_goal() {
                            *bundle.goals.get_mut(side) += 1;
                        }
                        if shot.is_on_target() {
                            *bundle.shots_on_target.get_mut(side) += 1;
                        }
                    }
                }
                Some(FOUL_COMMITTED) => *bundle.fouls.get_mut(side) += 1,
                Some(PASS) => {
                    *bundle.passes.get_mut(side) += 1;
                    // A pass record without detail has no outcome, so it counts as complete
                    if event.pass.as_ref().map_or(true, |p| p.is_complete()) {
                        *passes_complete.get_mut(side) += 1;
                    }
                }
                _ => {}
            }
        }

        let possession_total = possession_events.home + possession_events.away;
        bundle.possession = possession_events
            .map(|count| percentage(count, possession_total, NEUTRAL_POSSESSION));
        bundle.pass_completion = SidePair::new(
            percentage(passes_complete.home, bundle.passes.home, NO_PASS_COMPLETION),
            percentage(passes_complete.away, bundle.passes.away, NO_PASS_COMPLETION),
        );

        trace!(home, away, ?bundle.shots, ?bundle.possession, "reduced match stats");
        bundle
    }
}
