//! One façade wiring the catalog, the slots, the battle engine and the
//! leaderboard together for transports and binaries.

use std::sync::Arc;

use crate::core::battle::BattleEngine;
use crate::core::catalog::MemoryCatalog;
use crate::core::combatants::CombatantSlots;
use crate::core::leaderboard::Leaderboard;
use crate::domain::model::{BattleOutcome, LeaderboardEntry, Meal, MealId, SortKey};
use crate::domain::ports::{CatalogStore, RandomSource};
use crate::utils::error::Result;

pub struct MealBattleService<S: CatalogStore, R: RandomSource> {
    catalog: Arc<S>,
    slots: Arc<CombatantSlots<S>>,
    engine: BattleEngine<S, R>,
    leaderboard: Leaderboard<S>,
}

impl<R: RandomSource> MealBattleService<MemoryCatalog, R> {
    /// Service over a fresh in-memory catalog.
    pub fn in_memory(random: R) -> Self {
        Self::new(Arc::new(MemoryCatalog::new()), random)
    }
}

impl<S: CatalogStore, R: RandomSource> MealBattleService<S, R> {
    pub fn new(catalog: Arc<S>, random: R) -> Self {
        let slots = Arc::new(CombatantSlots::new(Arc::clone(&catalog)));
        let engine = BattleEngine::new(Arc::clone(&catalog), Arc::clone(&slots), random);
        let leaderboard = Leaderboard::new(Arc::clone(&catalog));
        Self {
            catalog,
            slots,
            engine,
            leaderboard,
        }
    }

    /// Create a meal. The difficulty arrives as its wire string and is
    /// parsed here; parsing is the validation boundary for it.
    pub fn create_meal(&self, name: &str, cuisine: &str, price: f64, difficulty: &str) -> Result<Meal> {
        let difficulty = difficulty.parse()?;
        self.catalog.create(name, cuisine, price, difficulty)
    }

    pub fn delete_meal(&self, id: MealId) -> Result<()> {
        self.catalog.delete(id)
    }

    /// Drop every meal and reset ids. Staged combatants are cleared too:
    /// after a reset their ids could rebind to unrelated new meals.
    pub fn clear_meals(&self) -> Result<()> {
        self.slots.clear();
        self.catalog.clear_all()
    }

    pub fn get_meal(&self, id: MealId) -> Result<Meal> {
        self.catalog.get_by_id(id)
    }

    pub fn get_meal_by_name(&self, name: &str) -> Result<Meal> {
        self.catalog.get_by_name(name)
    }

    /// Stage a meal by name for the next battle and return the staged
    /// lineup.
    pub fn prep_combatant(&self, name: &str) -> Result<Vec<Meal>> {
        let meal = self.catalog.get_by_name(name)?;
        self.slots.stage(meal.id)?;
        Ok(self.slots.current())
    }

    pub fn combatants(&self) -> Vec<Meal> {
        self.slots.current()
    }

    pub fn clear_combatants(&self) {
        self.slots.clear()
    }

    pub async fn battle(&self) -> Result<BattleOutcome> {
        self.engine.resolve().await
    }

    pub fn leaderboard(&self, sort: SortKey) -> Vec<LeaderboardEntry> {
        self.leaderboard.list(sort)
    }

    /// Store reachability, backing the db-check operation.
    pub fn check_store(&self) -> Result<()> {
        self.catalog.ping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::SeededRandom;

    fn service() -> MealBattleService<MemoryCatalog, SeededRandom> {
        MealBattleService::in_memory(SeededRandom::new(42))
    }

    #[test]
    fn test_create_parses_difficulty_string() {
        let svc = service();
        let meal = svc.create_meal("Pad Thai", "Thai", 12.5, "MED").unwrap();
        assert_eq!(meal.difficulty, crate::domain::model::Difficulty::Med);
    }

    #[test]
    fn test_create_rejects_unknown_difficulty() {
        let svc = service();
        let err = svc.create_meal("Pad Thai", "Thai", 12.5, "EXTREME").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid difficulty level: EXTREME. Must be 'LOW', 'MED', or 'HIGH'."
        );
    }

    #[test]
    fn test_create_never_coerces_difficulty_case() {
        let svc = service();
        assert!(svc.create_meal("Pad Thai", "Thai", 12.5, "low").is_err());
    }

    #[test]
    fn test_prep_combatant_resolves_by_name() {
        let svc = service();
        svc.create_meal("Ramen", "Japanese", 14.0, "LOW").unwrap();

        let staged = svc.prep_combatant("Ramen").unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].name, "Ramen");
    }

    #[test]
    fn test_prep_combatant_unknown_name() {
        let svc = service();
        let err = svc.prep_combatant("Nothing").unwrap_err();
        assert_eq!(err.to_string(), "Meal with name Nothing not found");
    }

    #[test]
    fn test_clear_meals_also_clears_combatants() {
        let svc = service();
        svc.create_meal("Ramen", "Japanese", 14.0, "LOW").unwrap();
        svc.prep_combatant("Ramen").unwrap();

        svc.clear_meals().unwrap();
        assert!(svc.combatants().is_empty());

        // Ids restart, so a stale slot could have pointed at this new meal.
        let fresh = svc.create_meal("Udon", "Japanese", 11.0, "MED").unwrap();
        assert_eq!(fresh.id, MealId(1));
        assert!(svc.combatants().is_empty());
    }

    #[tokio::test]
    async fn test_full_battle_flow() {
        let svc = service();
        svc.create_meal("Strong", "Thai", 100.0, "LOW").unwrap();
        svc.create_meal("Weak", "Thai", 100.0, "HIGH").unwrap();
        svc.prep_combatant("Strong").unwrap();
        svc.prep_combatant("Weak").unwrap();

        let outcome = svc.battle().await.unwrap();
        assert_eq!(outcome.winner.battles, 1);
        assert!(svc.combatants().is_empty());

        let board = svc.leaderboard(SortKey::Wins);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].wins, 1);
    }
}
