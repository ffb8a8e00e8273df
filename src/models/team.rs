//! Team lookup tables: display acronyms and kit colours.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colour used for teams missing from the directory.
pub const FALLBACK_COLOUR: &str = "#000000";

/// Built-in Premier League table: name, acronym, primary colour.
const DEFAULT_TEAMS: [(&str, &str, &str); 20] = [
    ("Arsenal", "ARS", "#EF0107"),
    ("Aston Villa", "AVL", "#670E36"),
    ("AFC Bournemouth", "BOU", "#DA291C"),
    ("Chelsea", "CHE", "#034694"),
    ("Crystal Palace", "CRY", "#1B458F"),
    ("Everton", "EVE", "#003399"),
    ("Leicester City", "LEI", "#003090"),
    ("Liverpool", "LIV", "#C8102E"),
    ("Manchester City", "MCI", "#6CABDD"),
    ("Manchester United", "MUN", "#DA291C"),
    ("Newcastle United", "NEW", "#241F20"),
    ("Norwich City", "NOR", "#FFF200"),
    ("Southampton", "SOU", "#D71920"),
    ("Stoke City", "STK", "#E03A3E"),
    ("Sunderland", "SUN", "#EB172B"),
    ("Swansea City", "SWA", "#231F20"),
    ("Tottenham Hotspur", "TOT", "#132257"),
    ("Watford", "WAT", "#FBEE23"),
    ("West Bromwich Albion", "WBA", "#122F67"),
    ("West Ham United", "WHU", "#7A263A"),
];

#[derive(Debug, Error, PartialEq)]
pub enum ColourError {
    #[error("Invalid hex colour: {0}")]
    InvalidHex(String),
}

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self, ColourError> {
        let invalid = || ColourError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// CSS `rgba(...)` string with the given opacity.
    pub fn rgba(&self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, opacity)
    }
}

/// Partial team entry as written in config; missing fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

/// Resolved display data for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProfile {
    pub name: String,
    pub acronym: String,
    pub colour: String,
}

/// Immutable name → profile lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct TeamDirectory {
    teams: BTreeMap<String, TeamProfile>,
}

impl Default for TeamDirectory {
    fn default() -> Self {
        let teams = DEFAULT_TEAMS
            .iter()
            .map(|&(name, acronym, colour)| {
                (
                    name.to_string(),
                    TeamProfile {
                        name: name.to_string(),
                        acronym: acronym.to_string(),
                        colour: colour.to_string(),
                    },
                )
            })
            .collect();
        Self { teams }
    }
}

impl TeamDirectory {
    /// Built-in table overlaid with configured entries.
    ///
    /// Configured colours are validated here so lookups never see bad hex.
    pub fn with_overrides(overrides: &BTreeMap<String, TeamEntry>) -> Result<Self, ColourError> {
        let mut directory = Self::default();
        for (name, entry) in overrides {
            if let Some(colour) = &entry.colour {
                Rgb::from_hex(colour)?;
            }
            let profile = directory
                .teams
                .entry(name.clone())
                .or_insert_with(|| TeamProfile {
                    name: name.clone(),
                    acronym: name.clone(),
                    colour: FALLBACK_COLOUR.to_string(),
                });
            if let Some(acronym) = &entry.acronym {
                profile.acronym = acronym.clone();
            }
            if let Some(colour) = &entry.colour {
                profile.colour = colour.clone();
            }
        }
        Ok(directory)
    }

    pub fn get(&self, name: &str) -> Option<&TeamProfile> {
        self.teams.get(name)
    }

    /// Short display name; unknown teams display their full name.
    pub fn acronym<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).map_or(name, |t| t.acronym.as_str())
    }

    pub fn colour(&self, name: &str) -> &str {
        self.get(name).map_or(FALLBACK_COLOUR, |t| t.colour.as_str())
    }

    pub fn rgb(&self, name: &str) -> Rgb {
        Rgb::from_hex(self.colour(name)).unwrap_or(Rgb { r: 0, g: 0, b: 0 })
    }

    pub fn rgba(&self, name: &str, opacity: f64) -> String {
        self.rgb(name).rgba(opacity)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
