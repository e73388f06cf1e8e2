use anyhow::{bail, Result};
use clap::Parser;

use meal_arena::adapters::random::RandomBackend;
use meal_arena::app::{dispatch, ApiRequest, ApiResponse, CreateMealRequest, PrepCombatantRequest};
use meal_arena::config::toml_config::TomlConfig;
use meal_arena::domain::ports::ConfigProvider;
use meal_arena::utils::{logger, validation::Validate};
use meal_arena::{CliConfig, MealBattleService, MealId, MemoryCatalog};

type Service = MealBattleService<MemoryCatalog, RandomBackend>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();

    let file_config = match &config.config {
        Some(path) => Some(TomlConfig::from_file(path)?),
        None => None,
    };
    if let Some(file_config) = &file_config {
        if let Err(e) = file_config.validate() {
            eprintln!("❌ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    }

    let verbose = config.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    logger::init_logger(verbose);

    tracing::info!("Starting meal-arena smoke flow");
    if verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // CLI randomness flags win over the file's settings.
    let random = if config.random_seed().is_some() || config.random_org_url().is_some() {
        RandomBackend::from_config(&config)
    } else if let Some(file_config) = &file_config {
        RandomBackend::from_config(file_config)
    } else {
        RandomBackend::from_config(&config)
    };

    let service = MealBattleService::in_memory(random);

    match run_smoke_flow(&service).await {
        Ok(()) => {
            tracing::info!("Smoke flow completed successfully");
            println!("✅ Smoke flow completed successfully!");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Smoke flow failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

/// Drive every operation of the JSON surface once, error probes included.
async fn run_smoke_flow(service: &Service) -> Result<()> {
    step(service, "health", 200, ApiRequest::Health).await?;
    step(service, "db-check", 200, ApiRequest::DbCheck).await?;
    step(service, "clear-meals", 200, ApiRequest::ClearMeals).await?;

    step(
        service,
        "create Pad Thai",
        201,
        create("Pad Thai", "Thai", 12.5, "MED"),
    )
    .await?;
    step(
        service,
        "create Spaghetti Carbonara",
        201,
        create("Spaghetti Carbonara", "Italian", 15.0, "LOW"),
    )
    .await?;
    step(
        service,
        "create Sushi Platter",
        201,
        create("Sushi Platter", "Japanese", 28.0, "HIGH"),
    )
    .await?;

    step(
        service,
        "create with negative price (rejected)",
        400,
        create("Mistake", "None", -3.0, "LOW"),
    )
    .await?;
    step(
        service,
        "create with bad difficulty (rejected)",
        400,
        create("Mistake", "None", 3.0, "EXTREME"),
    )
    .await?;

    step(service, "get meal 1", 200, ApiRequest::GetMealById(MealId(1))).await?;
    step(
        service,
        "get Sushi Platter by name",
        200,
        ApiRequest::GetMealByName("Sushi Platter".to_string()),
    )
    .await?;

    step(service, "delete meal 3", 200, ApiRequest::DeleteMeal(MealId(3))).await?;
    step(
        service,
        "get deleted meal (rejected)",
        404,
        ApiRequest::GetMealById(MealId(3)),
    )
    .await?;

    step(service, "prep Pad Thai", 200, prep("Pad Thai")).await?;
    step(service, "prep Spaghetti Carbonara", 200, prep("Spaghetti Carbonara")).await?;
    step(service, "prep third combatant (rejected)", 409, prep("Pad Thai")).await?;
    step(service, "get combatants", 200, ApiRequest::GetCombatants).await?;

    step(service, "battle", 200, ApiRequest::Battle).await?;
    step(service, "battle without combatants (rejected)", 409, ApiRequest::Battle).await?;

    step(service, "leaderboard", 200, ApiRequest::Leaderboard { sort: None }).await?;
    step(
        service,
        "leaderboard by winPct",
        200,
        ApiRequest::Leaderboard {
            sort: Some("winPct".to_string()),
        },
    )
    .await?;
    step(
        service,
        "leaderboard with bad sort (rejected)",
        400,
        ApiRequest::Leaderboard {
            sort: Some("bogus".to_string()),
        },
    )
    .await?;

    step(service, "clear-combatants", 200, ApiRequest::ClearCombatants).await?;
    Ok(())
}

async fn step(
    service: &Service,
    label: &str,
    expected: u16,
    request: ApiRequest,
) -> Result<ApiResponse> {
    let response = dispatch(service, request).await;
    if response.code != expected {
        bail!(
            "{} returned {} (expected {}): {}",
            label,
            response.code,
            expected,
            response.body
        );
    }
    println!("✅ {} -> {} {}", label, response.code, response.body);
    Ok(response)
}

fn create(name: &str, cuisine: &str, price: f64, difficulty: &str) -> ApiRequest {
    ApiRequest::CreateMeal(CreateMealRequest {
        meal: name.to_string(),
        cuisine: cuisine.to_string(),
        price,
        difficulty: difficulty.to_string(),
    })
}

fn prep(name: &str) -> ApiRequest {
    ApiRequest::PrepCombatant(PrepCombatantRequest {
        meal: name.to_string(),
    })
}
