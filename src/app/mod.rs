pub mod api;
pub mod service;

pub use api::{dispatch, ApiRequest, ApiResponse, CreateMealRequest, PrepCombatantRequest};
pub use service::MealBattleService;
