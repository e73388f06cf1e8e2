//! The JSON operation surface.
//!
//! Transports parse method+path+body into an `ApiRequest` and hand it to
//! `dispatch`; everything after that point is transport-agnostic. Success
//! bodies carry `"status": "success"` (health reports `"healthy"`), errors
//! carry `"status": "error"` plus a message, with the code taken from the
//! error taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::service::MealBattleService;
use crate::domain::model::{MealId, SortKey};
use crate::domain::ports::{CatalogStore, RandomSource};
use crate::utils::error::{ArenaError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateMealRequest {
    /// Wire key for the name, as the catalog has always spelled it.
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrepCombatantRequest {
    pub meal: String,
}

/// One variant per operation of the JSON surface.
#[derive(Clone, Debug)]
pub enum ApiRequest {
    Health,
    DbCheck,
    ClearMeals,
    CreateMeal(CreateMealRequest),
    DeleteMeal(MealId),
    GetMealById(MealId),
    GetMealByName(String),
    PrepCombatant(PrepCombatantRequest),
    GetCombatants,
    Battle,
    ClearCombatants,
    Leaderboard { sort: Option<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub code: u16,
    pub body: Value,
}

impl ApiResponse {
    fn with_code(code: u16, body: Value) -> Self {
        Self { code, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::with_code(200, body)
    }

    pub fn created(body: Value) -> Self {
        Self::with_code(201, body)
    }

    pub fn from_error(error: ArenaError) -> Self {
        let code = error.http_status();
        tracing::warn!("Request failed with {}: {}", code, error);
        Self::with_code(
            code,
            json!({"status": "error", "message": error.to_string()}),
        )
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Run one operation against the service and fold any failure into an
/// error response.
pub async fn dispatch<S, R>(service: &MealBattleService<S, R>, request: ApiRequest) -> ApiResponse
where
    S: CatalogStore,
    R: RandomSource,
{
    tracing::debug!("Dispatching {:?}", request);
    route(service, request)
        .await
        .unwrap_or_else(ApiResponse::from_error)
}

async fn route<S, R>(service: &MealBattleService<S, R>, request: ApiRequest) -> Result<ApiResponse>
where
    S: CatalogStore,
    R: RandomSource,
{
    match request {
        ApiRequest::Health => Ok(ApiResponse::ok(json!({"status": "healthy"}))),
        ApiRequest::DbCheck => {
            service.check_store()?;
            Ok(ApiResponse::ok(
                json!({"status": "success", "database": "reachable"}),
            ))
        }
        ApiRequest::ClearMeals => {
            service.clear_meals()?;
            Ok(ApiResponse::ok(json!({"status": "success"})))
        }
        ApiRequest::CreateMeal(body) => {
            let meal =
                service.create_meal(&body.meal, &body.cuisine, body.price, &body.difficulty)?;
            Ok(ApiResponse::created(json!({
                "status": "success",
                "meal": meal.name,
                "id": meal.id.0,
            })))
        }
        ApiRequest::DeleteMeal(id) => {
            service.delete_meal(id)?;
            Ok(ApiResponse::ok(
                json!({"status": "success", "meal_id": id.0}),
            ))
        }
        ApiRequest::GetMealById(id) => {
            let meal = service.get_meal(id)?;
            Ok(ApiResponse::ok(json!({
                "status": "success",
                "meal": serde_json::to_value(&meal)?,
            })))
        }
        ApiRequest::GetMealByName(name) => {
            let meal = service.get_meal_by_name(&name)?;
            Ok(ApiResponse::ok(json!({
                "status": "success",
                "meal": serde_json::to_value(&meal)?,
            })))
        }
        ApiRequest::PrepCombatant(body) => {
            let staged = service.prep_combatant(&body.meal)?;
            let names: Vec<&str> = staged.iter().map(|m| m.name.as_str()).collect();
            Ok(ApiResponse::ok(
                json!({"status": "success", "combatants": names}),
            ))
        }
        ApiRequest::GetCombatants => {
            let staged = service.combatants();
            Ok(ApiResponse::ok(json!({
                "status": "success",
                "combatants": serde_json::to_value(&staged)?,
            })))
        }
        ApiRequest::Battle => {
            let outcome = service.battle().await?;
            let mut body = serde_json::to_value(&outcome)?;
            if let Value::Object(map) = &mut body {
                map.insert("status".to_string(), json!("success"));
            }
            Ok(ApiResponse::ok(body))
        }
        ApiRequest::ClearCombatants => {
            service.clear_combatants();
            Ok(ApiResponse::ok(json!({"status": "success"})))
        }
        ApiRequest::Leaderboard { sort } => {
            let key = match sort {
                Some(value) => value.parse::<SortKey>()?,
                None => SortKey::Wins,
            };
            let entries = service.leaderboard(key);
            Ok(ApiResponse::ok(json!({
                "status": "success",
                "leaderboard": serde_json::to_value(&entries)?,
            })))
        }
    }
}
