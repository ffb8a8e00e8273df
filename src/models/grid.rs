//! Spatial histogram models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{PITCH_HEIGHT, PITCH_WIDTH};

/// Default bucket edge length, in pitch units.
pub const DEFAULT_CELL_SIZE: f64 = 5.0;

/// Default minute cutoff: the whole of normal time.
pub const DEFAULT_MINUTE_CUTOFF: i32 = 90;

/// Smallest accepted bucket edge length. Caps the grid at 1200 × 800 cells.
pub const MIN_CELL_SIZE: f64 = 0.1;

/// Invalid aggregation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("cell size must be a finite number of at least 0.1, got {0}")]
    InvalidCellSize(f64),
}

/// Filters and bucketing options for a heatmap aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Edge length of each square bucket
    pub cell_size: f64,

    /// Only count events by this team; `None` counts both teams
    pub team: Option<String>,

    /// Only count events of this type
    pub event_type: Option<String>,

    /// Only count events at or before this minute
    pub minute_cutoff: i32,

    /// Mirror x before bucketing
    pub flip_x: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            team: None,
            event_type: None,
            minute_cutoff: DEFAULT_MINUTE_CUTOFF,
            flip_x: false,
        }
    }
}

impl GridParams {
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_minute_cutoff(mut self, minute: i32) -> Self {
        self.minute_cutoff = minute;
        self
    }

    pub fn with_flip_x(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if !self.cell_size.is_finite() || self.cell_size < MIN_CELL_SIZE {
            return Err(ParamError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    /// Grid dimensions as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (
            (PITCH_WIDTH / self.cell_size).ceil() as usize,
            (PITCH_HEIGHT / self.cell_size).ceil() as usize,
        )
    }
}

/// Team filter from user input; blank or "both" means every team.
pub fn team_filter(team: Option<&str>) -> Option<String> {
    team.map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("both"))
        .map(str::to_string)
}

/// Event counts bucketed into a grid over the pitch.
///
/// `counts` is row-major; row 0 covers the top touchline (`y` near 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridHistogram {
    pub cell_size: f64,
    pub column_count: usize,
    pub row_count: usize,
    pub counts: Vec<Vec<u32>>,

    /// Largest single-cell count, never below 1
    pub max_count: u32,
    pub total_events: u32,
    pub active_cell_count: usize,
}

impl GridHistogram {
    /// Build a histogram from a filled matrix, deriving the summary scalars.
    pub fn from_counts(cell_size: f64, counts: Vec<Vec<u32>>) -> Self {
        let row_count = counts.len();
        let column_count = counts.first().map_or(0, |row| row.len());

        let cells = || counts.iter().flatten().copied();
        let max_count = cells().max().unwrap_or(0).max(1);
        let total_events = cells().sum();
        let active_cell_count = cells().filter(|&c| c > 0).count();

        Self {
            cell_size,
            column_count,
            row_count,
            counts,
            max_count,
            total_events,
            active_cell_count,
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<u32> {
        self.counts.get(row)?.get(col).copied()
    }

    /// Cell count relative to the busiest cell, in `[0, 1]`.
    pub fn intensity(&self, col: usize, row: usize) -> Option<f64> {
        let count = self.cell(col, row)?;
        Some(f64::from(count) / f64::from(self.max_count))
    }

    /// Pitch coordinates of the top-left corner of a cell.
    pub fn cell_origin(&self, col: usize, row: usize) -> Option<(f64, f64)> {
        if col >= self.column_count || row >= self.row_count {
            return None;
        }
        Some((col as f64 * self.cell_size, row as f64 * self.cell_size))
    }

    pub fn is_empty(&self) -> bool {
        self.total_events == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GridParams::default();
        assert_eq!(params.cell_size, 5.0);
        assert_eq!(params.minute_cutoff, 90);
        assert!(params.team.is_none());
        assert!(params.event_type.is_none());
        assert!(!params.flip_x);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(GridParams::default().dimensions(), (24, 16));
        assert_eq!(
            GridParams::default().with_cell_size(10.0).dimensions(),
            (12, 8)
        );
        // 120 / 7 = 17.1 -> 18, 80 / 7 = 11.4 -> 12
        assert_eq!(
            GridParams::default().with_cell_size(7.0).dimensions(),
            (18, 12)
        );
    }

    #[test]
    fn test_validate_cell_size() {
        assert!(GridParams::default().validate().is_ok());
        assert_eq!(
            GridParams::default().with_cell_size(0.0).validate(),
            Err(ParamError::InvalidCellSize(0.0))
        );
        assert!(GridParams::default()
            .with_cell_size(-5.0)
            .validate()
            .is_err());
        assert!(GridParams::default()
            .with_cell_size(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_cell_size() {
        for size in [1e-300, 0.001, 0.099] {
            assert_eq!(
                GridParams::default().with_cell_size(size).validate(),
                Err(ParamError::InvalidCellSize(size))
            );
        }

        let finest = GridParams::default().with_cell_size(MIN_CELL_SIZE);
        assert!(finest.validate().is_ok());
        assert_eq!(finest.dimensions(), (1200, 800));
    }

    #[test]
    fn test_team_filter() {
        assert_eq!(team_filter(None), None);
        assert_eq!(team_filter(Some("")), None);
        assert_eq!(team_filter(Some("   ")), None);
        assert_eq!(team_filter(Some("Both")), None);
        assert_eq!(team_filter(Some(" Arsenal ")), Some("Arsenal".to_string()));
    }

    #[test]
    fn test_from_counts_summary() {
        let hist = GridHistogram::from_counts(10.0, vec![vec![0, 3, 0], vec![1, 0, 2]]);

        assert_eq!(hist.column_count, 3);
        assert_eq!(hist.row_count, 2);
        assert_eq!(hist.max_count, 3);
        assert_eq!(hist.total_events, 6);
        assert_eq!(hist.active_cell_count, 3);
    }

    #[test]
    fn test_max_count_floor() {
        let hist = GridHistogram::from_counts(10.0, vec![vec![0, 0], vec![0, 0]]);
        assert_eq!(hist.max_count, 1);
        assert!(hist.is_empty());
    }

    #[test]
    fn test_cell_accessors() {
        let hist = GridHistogram::from_counts(10.0, vec![vec![0, 4], vec![2, 0]]);

        assert_eq!(hist.cell(1, 0), Some(4));
        assert_eq!(hist.cell(0, 1), Some(2));
        assert_eq!(hist.cell(2, 0), None);
        assert_eq!(hist.intensity(0, 1), Some(0.5));
        assert_eq!(hist.intensity(0, 0), Some(0.0));
        assert_eq!(hist.cell_origin(1, 1), Some((10.0, 10.0)));
        assert_eq!(hist.cell_origin(0, 2), None);
    }
}
