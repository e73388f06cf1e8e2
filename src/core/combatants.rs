//! Two-slot staging area for the next battle.
//!
//! Slots hold meal ids, not copies of the meals, so a meal deleted after
//! being staged goes stale rather than fighting as a ghost. Every read of
//! the slots re-resolves the ids against the catalog and silently drops
//! the ones that no longer resolve.
//!
//! Lock order is slots first, then the catalog. Nothing here awaits while
//! holding the slot lock.

use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::domain::model::{Meal, MealId};
use crate::domain::ports::CatalogStore;
use crate::utils::error::{ArenaError, Result};

pub const MAX_COMBATANTS: usize = 2;

pub struct CombatantSlots<S: CatalogStore> {
    catalog: Arc<S>,
    slots: Mutex<SmallVec<[MealId; MAX_COMBATANTS]>>,
}

impl<S: CatalogStore> CombatantSlots<S> {
    pub fn new(catalog: Arc<S>) -> Self {
        Self {
            catalog,
            slots: Mutex::new(SmallVec::new()),
        }
    }

    /// Stage a meal for the next battle.
    ///
    /// Stale ids are pruned before the capacity check, so a staged meal
    /// that has since been deleted does not hold a slot hostage. The new
    /// id must resolve to a live meal.
    pub fn stage(&self, id: MealId) -> Result<()> {
        let mut slots = self.slots.lock();
        slots.retain(|slot| self.catalog.get_by_id(*slot).is_ok());

        let meal = self.catalog.get_by_id(id)?;

        if slots.len() >= MAX_COMBATANTS {
            return Err(ArenaError::CapacityError {
                message: "Combatant list is full, cannot add more combatants.".to_string(),
            });
        }

        slots.push(meal.id);
        tracing::info!("Staged meal '{}' as combatant {}", meal.name, slots.len());
        Ok(())
    }

    /// Resolve the staged ids to live meals, in staging order.
    ///
    /// Self-healing: ids that no longer resolve are dropped from the
    /// slots as a side effect, so the next `stage` sees the freed space.
    pub fn current(&self) -> Vec<Meal> {
        let mut slots = self.slots.lock();
        let mut live = Vec::with_capacity(slots.len());
        slots.retain(|slot| match self.catalog.get_by_id(*slot) {
            Ok(meal) => {
                live.push(meal);
                true
            }
            Err(_) => {
                tracing::debug!("Dropping stale combatant {}", slot);
                false
            }
        });
        live
    }

    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        slots.clear();
        tracing::info!("Combatant slots cleared");
    }

    /// Take both staged meals for a battle, emptying the slots.
    ///
    /// Stale ids are pruned first; if fewer than two live combatants
    /// remain the take fails and the live ones stay staged for the next
    /// attempt. A successful take consumes the pair for good, whatever
    /// happens to the battle afterwards.
    pub fn take_pair(&self) -> Result<(Meal, Meal)> {
        let mut slots = self.slots.lock();

        let mut live: SmallVec<[Meal; MAX_COMBATANTS]> = SmallVec::new();
        slots.retain(|slot| match self.catalog.get_by_id(*slot) {
            Ok(meal) => {
                live.push(meal);
                true
            }
            Err(_) => {
                tracing::debug!("Dropping stale combatant {}", slot);
                false
            }
        });

        if live.len() < MAX_COMBATANTS {
            return Err(ArenaError::InsufficientCombatantsError {
                message: "Two combatants must be prepped for a battle.".to_string(),
            });
        }

        slots.clear();
        let second = live.remove(1);
        let first = live.remove(0);
        Ok((first, second))
    }
}
