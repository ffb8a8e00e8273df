//! Pitch coordinate system.

use serde::{Deserialize, Serialize};

/// Pitch length in pitch units (x axis).
pub const PITCH_WIDTH: f64 = 120.0;

/// Pitch width in pitch units (y axis).
pub const PITCH_HEIGHT: f64 = 80.0;

/// A point on the pitch. Serialized as a `[x, y]` pair.
///
/// `x` runs along the length of the pitch in `[0, 120]`, `y` across it in
/// `[0, 80]` with `y = 0` at the top touchline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror across the halfway line, so a team attacking right-to-left
    /// reads as attacking left-to-right.
    pub fn mirrored_x(self) -> Self {
        Self {
            x: PITCH_WIDTH - self.x,
            y: self.y,
        }
    }
}

impl From<[f64; 2]> for Location {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> Self {
        [loc.x, loc.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_pair() {
        let loc: Location = serde_json::from_str("[101.5, 38.0]").unwrap();
        assert_eq!(loc, Location::new(101.5, 38.0));
    }

    #[test]
    fn test_location_serializes_as_pair() {
        let json = serde_json::to_string(&Location::new(60.0, 40.0)).unwrap();
        assert_eq!(json, "[60.0,40.0]");
    }

    #[test]
    fn test_location_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Location>("[1.0, 2.0, 3.0]").is_err());
        assert!(serde_json::from_str::<Location>("[1.0]").is_err());
        assert!(serde_json::from_str::<Location>("[\"a\", 2.0]").is_err());
    }

    #[test]
    fn test_mirrored_x() {
        let loc = Location::new(100.0, 25.0).mirrored_x();
        assert_eq!(loc, Location::new(20.0, 25.0));
    }
}
