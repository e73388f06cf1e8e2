use crate::domain::model::{Difficulty, Meal, MealId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Record store owning the meal catalog.
///
/// Implementations must keep every method bounded to local work (no
/// external calls inside their critical sections) and make
/// `record_outcome` all-or-nothing: both records validated before either
/// is touched.
pub trait CatalogStore: Send + Sync {
    /// Insert a new meal with zeroed stats and return it.
    fn create(&self, name: &str, cuisine: &str, price: f64, difficulty: Difficulty) -> Result<Meal>;

    /// Soft-delete a meal. Deleting twice is an error, not a no-op.
    fn delete(&self, id: MealId) -> Result<()>;

    fn get_by_id(&self, id: MealId) -> Result<Meal>;

    /// Most recently created non-deleted meal with this name.
    fn get_by_name(&self, name: &str) -> Result<Meal>;

    /// Reset the store to empty, id counter included.
    fn clear_all(&self) -> Result<()>;

    /// Atomically bump `battles` on both records and `wins` on the winner,
    /// returning the refreshed (winner, loser) pair.
    fn record_outcome(&self, winner: MealId, loser: MealId) -> Result<(Meal, Meal)>;

    /// All non-deleted meals.
    fn snapshot(&self) -> Vec<Meal>;

    /// Backend reachability check for db-check.
    fn ping(&self) -> Result<()>;
}

/// Source of uniform randomness for battle resolution.
///
/// The single capability keeps outcome draws injectable: seeded for
/// deterministic replay, OS-backed for production, HTTP-backed for
/// random.org. Implementations are thread-safe; a draw may be an external
/// call, so callers must never hold a lock across it.
#[async_trait]
pub trait RandomSource: Send + Sync {
    /// Draw one uniform value in [0,1).
    async fn next_uniform(&self) -> Result<f64>;
}

/// Configuration surface the service wiring consumes.
pub trait ConfigProvider: Send + Sync {
    /// Fixed seed for deterministic battles, if configured.
    fn random_seed(&self) -> Option<u64>;

    /// random.org-style endpoint, if the HTTP backend is configured.
    fn random_org_url(&self) -> Option<&str>;

    fn verbose(&self) -> bool;
}
