use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ArenaError;

/// Unique identifier for a meal in the catalog.
///
/// Ids are assigned monotonically on creation and never reused while the
/// store lives. Serializes as a bare number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(pub u64);

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Preparation difficulty of a meal. Wire values are upper-case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MED")]
    Med,
    #[serde(rename = "HIGH")]
    High,
}

impl Difficulty {
    /// Weight applied to price when computing a battle score.
    ///
    /// Harder dishes are riskier to execute well, so they weigh less
    /// favorably despite their price contribution.
    pub fn weight(self) -> f64 {
        match self {
            Difficulty::Low => 3.0,
            Difficulty::Med => 2.0,
            Difficulty::High => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Low => "LOW",
            Difficulty::Med => "MED",
            Difficulty::High => "HIGH",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, ArenaError> {
        match s {
            "LOW" => Ok(Difficulty::Low),
            "MED" => Ok(Difficulty::Med),
            "HIGH" => Ok(Difficulty::High),
            other => Err(ArenaError::ValidationError {
                message: format!(
                    "Invalid difficulty level: {}. Must be 'LOW', 'MED', or 'HIGH'.",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog meal record.
///
/// `name` serializes under the wire key `meal` (the catalog's historical
/// wire format); the soft-delete flag never leaves the process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    #[serde(rename = "meal")]
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,
    #[serde(skip)]
    pub deleted: bool,
}

impl Meal {
    /// Win percentage over fought battles, `None` before the first battle.
    pub fn win_pct(&self) -> Option<f64> {
        if self.battles == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(self.battles) * 100.0)
        }
    }
}

/// Leaderboard orderings. Parsed from the `sort` query value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Wins,
    Battles,
    WinPct,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Wins => "wins",
            SortKey::Battles => "battles",
            SortKey::WinPct => "winPct",
        }
    }
}

impl FromStr for SortKey {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, ArenaError> {
        match s {
            "wins" => Ok(SortKey::Wins),
            "battles" => Ok(SortKey::Battles),
            "winPct" => Ok(SortKey::WinPct),
            other => Err(ArenaError::ValidationError {
                message: format!("Invalid sort parameter: {}", other),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked row of the leaderboard projection.
///
/// `win_pct` is a percentage rounded to one decimal (3 wins over 10
/// battles reads 30.0).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: MealId,
    #[serde(rename = "meal")]
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,
    pub win_pct: f64,
}

impl From<&Meal> for LeaderboardEntry {
    fn from(meal: &Meal) -> Self {
        let win_pct = meal.win_pct().unwrap_or(0.0);
        Self {
            id: meal.id,
            name: meal.name.clone(),
            cuisine: meal.cuisine.clone(),
            price: meal.price,
            difficulty: meal.difficulty,
            battles: meal.battles,
            wins: meal.wins,
            win_pct: (win_pct * 10.0).round() / 10.0,
        }
    }
}

/// Everything a caller needs to audit a resolved battle, not just the
/// winner id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: Meal,
    pub loser: Meal,
    pub winner_score: f64,
    pub loser_score: f64,
    /// Normalized probability the winner had going into the draw.
    pub win_probability: f64,
    /// The uniform draw in [0,1) that decided the outcome.
    pub roll: f64,
    pub resolved_at: DateTime<Utc>,
}
