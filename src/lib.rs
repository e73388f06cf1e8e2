pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{OsRandom, RandomBackend, RandomOrgSource, SeededRandom};
pub use app::{dispatch, ApiRequest, ApiResponse, MealBattleService};
pub use config::CliConfig;
pub use core::{
    battle::BattleEngine, catalog::MemoryCatalog, combatants::CombatantSlots,
    leaderboard::Leaderboard,
};
pub use domain::model::{BattleOutcome, Difficulty, LeaderboardEntry, Meal, MealId, SortKey};
pub use domain::ports::{CatalogStore, ConfigProvider, RandomSource};
pub use utils::error::{ArenaError, Result};
