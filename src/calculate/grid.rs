//! Heatmap grid bucketing.

use tracing::trace;

use crate::models::{GridHistogram, GridParams, MatchEvent};

/// Buckets located events into a [`GridHistogram`].
pub struct GridAggregator;

impl GridAggregator {
    /// Count matching events per grid cell.
    ///
    /// Events without a location, failing a filter, later than the minute
    /// cutoff, or landing outside the grid after the optional flip are left
    /// out of every count. `params.cell_size` must be positive; callers
    /// check it with [`GridParams::validate`].
    pub fn aggregate(events: &[MatchEvent], params: &GridParams) -> GridHistogram {
        let (columns, rows) = params.dimensions();
        let mut counts = vec![vec![0u32; columns]; rows];

        for event in events.iter().filter(|e| Self::matches(e, params)) {
            let Some(mut loc) = event.location else {
                continue;
            };
            if params.flip_x {
                loc = loc.mirrored_x();
            }

            let col = (loc.x / params.cell_size).floor();
            let row = (loc.y / params.cell_size).floor();
            if !(0.0..columns as f64).contains(&col) || !(0.0..rows as f64).contains(&row) {
                continue;
            }
            counts[row as usize][col as usize] += 1;
        }

        let histogram = GridHistogram::from_counts(params.cell_size, counts);
        trace!(
            total = histogram.total_events,
            active = histogram.active_cell_count,
            max = histogram.max_count,
            "aggregated heatmap grid"
        );
        histogram
    }

    fn matches(event: &MatchEvent, params: &GridParams) -> bool {
        if event.location.is_none() {
            return false;
        }
        if let Some(team) = params.team.as_deref() {
            if event.team_name() != Some(team) {
                return false;
            }
        }
        if let Some(event_type) = params.event_type.as_deref() {
            if event.type_name() != Some(event_type) {
                return false;
            }
        }
        event.minute_or_zero() <= params.minute_cutoff
    }
}
