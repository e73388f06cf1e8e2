//! In-process meal catalog behind the `CatalogStore` port.
//!
//! One store-wide lock guards the whole table: reads take the shared side,
//! every mutation takes the exclusive side, and `record_outcome` performs
//! its validation and both increments under a single write acquisition so
//! concurrent battles can never observe or produce a partial update.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::model::{Difficulty, Meal, MealId};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{ArenaError, Result};

#[derive(Debug, Default)]
struct CatalogState {
    meals: BTreeMap<MealId, Meal>,
    next_id: u64,
}

/// In-memory catalog store.
///
/// Ids are handed out monotonically starting at 1 and are not reused;
/// `clear_all` resets the counter along with the table, matching the
/// drop-and-recreate semantics callers rely on for test isolation.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: MealId) -> ArenaError {
    ArenaError::NotFoundError {
        message: format!("Meal with ID {} not found", id),
    }
}

fn already_deleted(id: MealId) -> ArenaError {
    ArenaError::NotFoundError {
        message: format!("Meal with ID {} has been deleted", id),
    }
}

impl CatalogStore for MemoryCatalog {
    fn create(&self, name: &str, cuisine: &str, price: f64, difficulty: Difficulty) -> Result<Meal> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ArenaError::ValidationError {
                message: format!("Invalid price: {}. Price must be a positive number.", price),
            });
        }

        let mut state = self.state.write();
        state.next_id += 1;
        let meal = Meal {
            id: MealId(state.next_id),
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            price,
            difficulty,
            battles: 0,
            wins: 0,
            deleted: false,
        };
        state.meals.insert(meal.id, meal.clone());

        tracing::info!("Created meal '{}' (id {}, {})", meal.name, meal.id, meal.difficulty);
        Ok(meal)
    }

    fn delete(&self, id: MealId) -> Result<()> {
        let mut state = self.state.write();
        match state.meals.get_mut(&id) {
            Some(meal) if meal.deleted => Err(already_deleted(id)),
            Some(meal) => {
                meal.deleted = true;
                tracing::info!("Deleted meal {} ('{}')", id, meal.name);
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    fn get_by_id(&self, id: MealId) -> Result<Meal> {
        let state = self.state.read();
        match state.meals.get(&id) {
            Some(meal) if meal.deleted => Err(already_deleted(id)),
            Some(meal) => Ok(meal.clone()),
            None => Err(not_found(id)),
        }
    }

    fn get_by_name(&self, name: &str) -> Result<Meal> {
        let state = self.state.read();
        // Highest id wins: the most recently created match.
        state
            .meals
            .values()
            .rev()
            .find(|meal| !meal.deleted && meal.name == name)
            .cloned()
            .ok_or_else(|| ArenaError::NotFoundError {
                message: format!("Meal with name {} not found", name),
            })
    }

    fn clear_all(&self) -> Result<()> {
        let mut state = self.state.write();
        *state = CatalogState::default();
        tracing::info!("Catalog cleared");
        Ok(())
    }

    fn record_outcome(&self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)> {
        let mut state = self.state.write();

        if winner == loser {
            // Same meal staged into both slots: it fought itself twice and
            // won once.
            let meal = match state.meals.get_mut(&winner) {
                Some(meal) if meal.deleted => return Err(already_deleted(winner)),
                Some(meal) => meal,
                None => return Err(not_found(winner)),
            };
            meal.battles += 2;
            meal.wins += 1;
            let refreshed = meal.clone();
            return Ok((refreshed.clone(), refreshed));
        }

        // Validate the loser up front so the winner is never half-updated.
        match state.meals.get(&loser) {
            Some(meal) if meal.deleted => return Err(already_deleted(loser)),
            Some(_) => {}
            None => return Err(not_found(loser)),
        }

        let winner_rec = match state.meals.get_mut(&winner) {
            Some(meal) if meal.deleted => return Err(already_deleted(winner)),
            Some(meal) => {
                meal.battles += 1;
                meal.wins += 1;
                meal.clone()
            }
            None => return Err(not_found(winner)),
        };
        let loser_rec = match state.meals.get_mut(&loser) {
            Some(meal) => {
                meal.battles += 1;
                meal.clone()
            }
            None => return Err(not_found(loser)),
        };

        Ok((winner_rec, loser_rec))
    }

    fn snapshot(&self) -> Vec<Meal> {
        let state = self.state.read();
        state
            .meals
            .values()
            .filter(|meal| !meal.deleted)
            .cloned()
            .collect()
    }

    fn ping(&self) -> Result<()> {
        // Reachability only: taking the read lock proves the store is live.
        let _state = self.state.read();
        Ok(())
    }
}
