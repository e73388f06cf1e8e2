//! Battle resolution: one weighted coin flip per battle.
//!
//! A meal's battle score is its price multiplied by the difficulty
//! weight, so cheap-and-easy beats expensive-and-hard more often than
//! not. The winner is decided by a single uniform draw against the
//! first combatant's normalized share of the combined score.

use chrono::Utc;
use std::sync::Arc;

use crate::core::combatants::CombatantSlots;
use crate::domain::model::{BattleOutcome, Meal};
use crate::domain::ports::{CatalogStore, RandomSource};
use crate::utils::error::Result;

/// Price times difficulty weight. LOW outweighs HIGH: an easy dish at
/// the same price is the stronger contender.
pub fn battle_score(meal: &Meal) -> f64 {
    meal.price * meal.difficulty.weight()
}

/// Probability that the first score wins against the second.
///
/// Falls back to a fair coin when both scores are zero so the draw is
/// still well-defined.
pub fn win_probability(score: f64, opponent_score: f64) -> f64 {
    let total = score + opponent_score;
    if total <= 0.0 {
        0.5
    } else {
        score / total
    }
}

pub struct BattleEngine<S: CatalogStore, R: RandomSource> {
    catalog: Arc<S>,
    slots: Arc<CombatantSlots<S>>,
    random: R,
}

impl<S: CatalogStore, R: RandomSource> BattleEngine<S, R> {
    pub fn new(catalog: Arc<S>, slots: Arc<CombatantSlots<S>>, random: R) -> Self {
        Self {
            catalog,
            slots,
            random,
        }
    }

    /// Resolve one battle between the two staged combatants.
    ///
    /// The slots are consumed up front, so of two concurrent calls
    /// exactly one gets the pair and the other reports that no battle
    /// is prepped. The random draw is awaited with no locks held, and
    /// both stat updates land in one atomic recording.
    pub async fn resolve(&self) -> Result<BattleOutcome> {
        tracing::info!("Two meals enter, one meal leaves!");
        let (first, second) = self.slots.take_pair()?;

        let first_score = battle_score(&first);
        let second_score = battle_score(&second);
        let p_first = win_probability(first_score, second_score);

        let roll = self.random.next_uniform().await?;

        let (winner, loser, winner_score, loser_score, win_probability) = if roll < p_first {
            (first, second, first_score, second_score, p_first)
        } else {
            (second, first, second_score, first_score, 1.0 - p_first)
        };

        let (winner, loser) = self.catalog.record_outcome(winner.id, loser.id)?;
        tracing::info!(
            "'{}' defeats '{}' (p = {:.3}, roll = {:.3})",
            winner.name,
            loser.name,
            win_probability,
            roll
        );

        Ok(BattleOutcome {
            winner,
            loser,
            winner_score,
            loser_score,
            win_probability,
            roll,
            resolved_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::random::SeededRandom;
    use crate::core::catalog::MemoryCatalog;
    use crate::domain::model::{Difficulty, MealId};
    use async_trait::async_trait;

    /// Always returns the same roll.
    struct FixedRandom(f64);

    #[async_trait]
    impl RandomSource for FixedRandom {
        async fn next_uniform(&self) -> Result<f64> {
            Ok(self.0)
        }
    }

    /// Deletes a meal while the draw is in flight.
    struct DeleteOnDraw {
        catalog: Arc<MemoryCatalog>,
        target: MealId,
    }

    #[async_trait]
    impl RandomSource for DeleteOnDraw {
        async fn next_uniform(&self) -> Result<f64> {
            self.catalog.delete(self.target)?;
            Ok(0.0)
        }
    }

    fn arena<R: RandomSource>(
        random: R,
    ) -> (Arc<MemoryCatalog>, Arc<CombatantSlots<MemoryCatalog>>, BattleEngine<MemoryCatalog, R>) {
        let catalog = Arc::new(MemoryCatalog::new());
        let slots = Arc::new(CombatantSlots::new(Arc::clone(&catalog)));
        let engine = BattleEngine::new(Arc::clone(&catalog), Arc::clone(&slots), random);
        (catalog, slots, engine)
    }

    #[test]
    fn test_battle_score_applies_difficulty_weight() {
        let mut meal = Meal {
            id: MealId(1),
            name: "Test".to_string(),
            cuisine: "Test".to_string(),
            price: 100.0,
            difficulty: Difficulty::Low,
            battles: 0,
            wins: 0,
            deleted: false,
        };
        assert_eq!(battle_score(&meal), 300.0);

        meal.difficulty = Difficulty::Med;
        assert_eq!(battle_score(&meal), 200.0);

        meal.difficulty = Difficulty::High;
        assert_eq!(battle_score(&meal), 100.0);
    }

    #[test]
    fn test_win_probability_normalizes() {
        assert_eq!(win_probability(300.0, 100.0), 0.75);
        assert_eq!(win_probability(100.0, 300.0), 0.25);
        assert_eq!(win_probability(50.0, 50.0), 0.5);
    }

    #[test]
    fn test_win_probability_degenerate_scores() {
        assert_eq!(win_probability(0.0, 0.0), 0.5);
    }

    #[tokio::test]
    async fn test_low_roll_gives_first_combatant_the_win() {
        let (catalog, slots, engine) = arena(FixedRandom(0.1));
        let first = catalog.create("First", "C", 100.0, Difficulty::Low).unwrap();
        let second = catalog.create("Second", "C", 100.0, Difficulty::High).unwrap();
        slots.stage(first.id).unwrap();
        slots.stage(second.id).unwrap();

        // p(first) = 300 / 400 = 0.75 and the roll is 0.1.
        let outcome = engine.resolve().await.unwrap();
        assert_eq!(outcome.winner.id, first.id);
        assert_eq!(outcome.loser.id, second.id);
        assert_eq!(outcome.winner_score, 300.0);
        assert_eq!(outcome.loser_score, 100.0);
        assert_eq!(outcome.win_probability, 0.75);
        assert_eq!(outcome.roll, 0.1);
    }

    #[tokio::test]
    async fn test_high_roll_gives_second_combatant_the_win() {
        let (catalog, slots, engine) = arena(FixedRandom(0.9));
        let first = catalog.create("First", "C", 100.0, Difficulty::Low).unwrap();
        let second = catalog.create("Second", "C", 100.0, Difficulty::High).unwrap();
        slots.stage(first.id).unwrap();
        slots.stage(second.id).unwrap();

        let outcome = engine.resolve().await.unwrap();
        assert_eq!(outcome.winner.id, second.id);
        assert_eq!(outcome.win_probability, 0.25);
    }

    #[tokio::test]
    async fn test_roll_equal_to_probability_loses() {
        let (catalog, slots, engine) = arena(FixedRandom(0.75));
        let first = catalog.create("First", "C", 100.0, Difficulty::Low).unwrap();
        let second = catalog.create("Second", "C", 100.0, Difficulty::High).unwrap();
        slots.stage(first.id).unwrap();
        slots.stage(second.id).unwrap();

        // Winner requires roll strictly below p.
        let outcome = engine.resolve().await.unwrap();
        assert_eq!(outcome.winner.id, second.id);
    }

    #[tokio::test]
    async fn test_battle_updates_stats_and_empties_slots() {
        let (catalog, slots, engine) = arena(FixedRandom(0.1));
        let first = catalog.create("First", "C", 100.0, Difficulty::Low).unwrap();
        let second = catalog.create("Second", "C", 100.0, Difficulty::High).unwrap();
        slots.stage(first.id).unwrap();
        slots.stage(second.id).unwrap();

        let outcome = engine.resolve().await.unwrap();
        assert_eq!(outcome.winner.battles, 1);
        assert_eq!(outcome.winner.wins, 1);
        assert_eq!(outcome.loser.battles, 1);
        assert_eq!(outcome.loser.wins, 0);

        assert_eq!(catalog.get_by_id(first.id).unwrap().wins, 1);
        assert_eq!(catalog.get_by_id(second.id).unwrap().battles, 1);
        assert!(slots.current().is_empty());
    }

    #[tokio::test]
    async fn test_battle_without_combatants_touches_nothing() {
        let (catalog, slots, engine) = arena(FixedRandom(0.1));
        let meal = catalog.create("Lonely", "C", 100.0, Difficulty::Low).unwrap();
        slots.stage(meal.id).unwrap();

        let err = engine.resolve().await.unwrap_err();
        assert_eq!(err.to_string(), "Two combatants must be prepped for a battle.");
        assert_eq!(catalog.get_by_id(meal.id).unwrap().battles, 0);

        // The staged combatant survives the failed attempt.
        let staged = slots.current();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].id, meal.id);
    }

    #[tokio::test]
    async fn test_combatant_deleted_mid_draw_fails_cleanly() {
        let catalog = Arc::new(MemoryCatalog::new());
        let first = catalog.create("First", "C", 100.0, Difficulty::Low).unwrap();
        let second = catalog.create("Second", "C", 100.0, Difficulty::High).unwrap();

        let slots = Arc::new(CombatantSlots::new(Arc::clone(&catalog)));
        slots.stage(first.id).unwrap();
        slots.stage(second.id).unwrap();

        let random = DeleteOnDraw {
            catalog: Arc::clone(&catalog),
            target: first.id,
        };
        let engine = BattleEngine::new(Arc::clone(&catalog), Arc::clone(&slots), random);

        let err = engine.resolve().await.unwrap_err();
        assert!(err.to_string().contains("has been deleted"));

        // No half-recorded battle and the slots stay consumed.
        assert_eq!(catalog.get_by_id(second.id).unwrap().battles, 0);
        assert!(slots.current().is_empty());
    }

    #[tokio::test]
    async fn test_self_battle_records_both_sides() {
        let (catalog, slots, engine) = arena(FixedRandom(0.1));
        let meal = catalog.create("Solo", "C", 100.0, Difficulty::Low).unwrap();
        slots.stage(meal.id).unwrap();
        slots.stage(meal.id).unwrap();

        let outcome = engine.resolve().await.unwrap();
        assert_eq!(outcome.winner.id, meal.id);
        assert_eq!(outcome.winner.battles, 2);
        assert_eq!(outcome.winner.wins, 1);
    }

    #[tokio::test]
    async fn test_win_rate_converges_on_score_share() {
        let (catalog, slots, engine) = arena(SeededRandom::new(42));
        let strong = catalog.create("Strong", "C", 100.0, Difficulty::Low).unwrap();
        let weak = catalog.create("Weak", "C", 100.0, Difficulty::High).unwrap();

        let rounds = 1000;
        for _ in 0..rounds {
            slots.stage(strong.id).unwrap();
            slots.stage(weak.id).unwrap();
            engine.resolve().await.unwrap();
        }

        // p(strong) = 0.75; a seeded run of 1000 lands close to it.
        let observed = catalog.get_by_id(strong.id).unwrap().wins as f64 / rounds as f64;
        assert!(
            (0.70..=0.80).contains(&observed),
            "observed win rate {} outside expected band",
            observed
        );
    }
}
