//! Match statistics models.

use serde::{Deserialize, Serialize};

/// Which of the two designated teams a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// A home/away pair of values for one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SidePair<T> {
    pub home: T,
    pub away: T,
}

impl<T> SidePair<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SidePair<U> {
        SidePair {
            home: f(self.home),
            away: f(self.away),
        }
    }
}

impl<T: PartialOrd> SidePair<T> {
    /// The side with the strictly larger value, `None` on a tie.
    pub fn leader(&self) -> Option<Side> {
        if self.home > self.away {
            Some(Side::Home)
        } else if self.away > self.home {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// Per-team statistics for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStatsBundle {
    pub shots: SidePair<u32>,
    pub shots_on_target: SidePair<u32>,
    pub expected_goals: SidePair<f64>,
    pub goals: SidePair<u32>,

    /// Percentage of in-play events, 0 to 100
    pub possession: SidePair<u32>,
    pub fouls: SidePair<u32>,
    pub passes: SidePair<u32>,

    /// Percentage of attempted passes completed, 0 to 100
    pub pass_completion: SidePair<u32>,
}

/// One labelled line of a stats panel, values already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub label: &'static str,
    pub home: String,
    pub away: String,
    pub leader: Option<Side>,
}

impl StatRow {
    fn count(label: &'static str, pair: SidePair<u32>) -> Self {
        Self {
            label,
            home: pair.home.to_string(),
            away: pair.away.to_string(),
            leader: pair.leader(),
        }
    }

    fn percent(label: &'static str, pair: SidePair<u32>) -> Self {
        Self {
            label,
            home: format!("{}%", pair.home),
            away: format!("{}%", pair.away),
            leader: pair.leader(),
        }
    }
}

impl MatchStatsBundle {
    /// Rows in panel display order.
    pub fn rows(&self) -> Vec<StatRow> {
        vec![
            StatRow::count("Shots", self.shots),
            StatRow::count("Shots on Target", self.shots_on_target),
            StatRow {
                label: "xG",
                home: format!("{:.2}", self.expected_goals.home),
                away: format!("{:.2}", self.expected_goals.away),
                leader: self.expected_goals.leader(),
            },
            StatRow::percent("Possession", self.possession),
            StatRow::count("Passes", self.passes),
            StatRow::percent("Pass Completion", self.pass_completion),
            StatRow::count("Fouls Committed", self.fouls),
        ]
    }
}
