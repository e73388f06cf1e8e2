//! Ranked standings over the battle-tested part of the catalog.
//!
//! Only meals with at least one battle make the board; deleted meals
//! are already filtered out by the catalog snapshot. Sorting is stable
//! for callers: ties on the requested key fall back to raw win
//! percentage, then to the lower id.

use std::io;
use std::sync::Arc;

use crate::domain::model::{LeaderboardEntry, Meal, SortKey};
use crate::domain::ports::CatalogStore;
use crate::utils::error::Result;

pub struct Leaderboard<S: CatalogStore> {
    catalog: Arc<S>,
}

fn raw_pct(meal: &Meal) -> f64 {
    meal.win_pct().unwrap_or(0.0)
}

impl<S: CatalogStore> Leaderboard<S> {
    pub fn new(catalog: Arc<S>) -> Self {
        Self { catalog }
    }

    /// Standings sorted descending by `sort`, over meals that have
    /// fought at least once.
    pub fn list(&self, sort: SortKey) -> Vec<LeaderboardEntry> {
        let mut veterans: Vec<Meal> = self
            .catalog
            .snapshot()
            .into_iter()
            .filter(|meal| meal.battles > 0)
            .collect();

        veterans.sort_by(|a, b| {
            let primary = match sort {
                SortKey::Wins => b.wins.cmp(&a.wins),
                SortKey::Battles => b.battles.cmp(&a.battles),
                SortKey::WinPct => raw_pct(b).total_cmp(&raw_pct(a)),
            };
            primary
                .then_with(|| raw_pct(b).total_cmp(&raw_pct(a)))
                .then_with(|| a.id.cmp(&b.id))
        });

        tracing::debug!("Leaderboard of {} meals sorted by {}", veterans.len(), sort);
        veterans.iter().map(LeaderboardEntry::from).collect()
    }
}

/// Serialize standings as CSV, header row included.
pub fn write_csv<W: io::Write>(entries: &[LeaderboardEntry], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;
    Ok(())
}
