pub mod battle;
pub mod catalog;
pub mod combatants;
pub mod leaderboard;

pub use crate::domain::model::{BattleOutcome, Difficulty, Meal, MealId, SortKey};
pub use crate::domain::ports::{CatalogStore, ConfigProvider, RandomSource};
pub use crate::utils::error::Result;
