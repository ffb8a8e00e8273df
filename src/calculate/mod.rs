//! Aggregation engine.
//!
//! Pure computations over a match event log:
//! - Spatial histograms for heatmaps ([`GridAggregator`])
//! - Per-team match statistics ([`MatchStatsReducer`])
//! - Shot map markers ([`extract_shots`])
//!
//! Nothing here performs I/O or keeps state between calls, so results can be
//! memoized by log identity plus parameters.

mod grid;
mod shots;
mod stats;

pub use grid::GridAggregator;
pub use shots::extract_shots;
pub use stats::MatchStatsReducer;

/// Integer percentage of `part` in `total`, rounded half up.
/// Returns `default` when `total` is zero.
pub fn percentage(part: u32, total: u32, default: u32) -> u32 {
    if total == 0 {
        default
    } else {
        (f64::from(part) * 100.0 / f64::from(total)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4, 0), 25);
        assert_eq!(percentage(4, 4, 0), 100);
        assert_eq!(percentage(0, 4, 50), 0);
    }

    #[test]
    fn test_percentage_rounding() {
        // 2/3 = 66.67
        assert_eq!(percentage(2, 3, 0), 67);
        // 1/3 = 33.33
        assert_eq!(percentage(1, 3, 0), 33);
        // 1/8 = 12.5 rounds up
        assert_eq!(percentage(1, 8, 0), 13);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0, 50), 50);
        assert_eq!(percentage(0, 0, 0), 0);
    }
}
