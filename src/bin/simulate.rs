use anyhow::Result;
use clap::Parser;
use std::fs::File;

use meal_arena::adapters::random::SeededRandom;
use meal_arena::core::battle::{battle_score, win_probability};
use meal_arena::core::leaderboard::write_csv;
use meal_arena::utils::logger;
use meal_arena::{MealBattleService, SortKey};

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Seeded batch battle simulation over a sample bracket")]
struct Args {
    /// Seed for the deterministic battle rolls
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of battles between the anchor pair
    #[arg(short, long, default_value = "1000")]
    rounds: u32,

    /// Write the final leaderboard to this CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose);

    tracing::info!(
        "Starting battle simulation (seed {}, {} rounds)",
        args.seed,
        args.rounds
    );

    let service = MealBattleService::in_memory(SeededRandom::new(args.seed));

    // One LOW and one HIGH dish at the same price anchor the analytic
    // check; the other two pad the leaderboard.
    service.create_meal("Green Curry", "Thai", 100.0, "LOW")?;
    service.create_meal("Beef Wellington", "British", 100.0, "HIGH")?;
    service.create_meal("Pad Thai", "Thai", 12.5, "MED")?;
    service.create_meal("Carbonara", "Italian", 15.0, "LOW")?;

    println!("🥊 Running {} battles: Green Curry vs Beef Wellington", args.rounds);
    for _ in 0..args.rounds {
        service.prep_combatant("Green Curry")?;
        service.prep_combatant("Beef Wellington")?;
        service.battle().await?;
    }

    // A short undercard so every meal shows up on the board.
    for _ in 0..10 {
        service.prep_combatant("Pad Thai")?;
        service.prep_combatant("Carbonara")?;
        service.battle().await?;
    }

    let curry = service.get_meal_by_name("Green Curry")?;
    let wellington = service.get_meal_by_name("Beef Wellington")?;
    let analytic = win_probability(battle_score(&curry), battle_score(&wellington));
    let empirical = f64::from(curry.wins) / f64::from(curry.battles);

    println!();
    println!("📊 Anchor pair ({} rounds):", args.rounds);
    println!("  Analytic win rate for Green Curry:  {:.4}", analytic);
    println!("  Empirical win rate for Green Curry: {:.4}", empirical);

    println!();
    println!("🏆 Final leaderboard (by wins):");
    let entries = service.leaderboard(SortKey::Wins);
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "  {}. {} ({}) - {} wins / {} battles ({:.1}%)",
            rank + 1,
            entry.name,
            entry.cuisine,
            entry.wins,
            entry.battles,
            entry.win_pct
        );
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        write_csv(&entries, file)?;
        println!();
        println!("📁 Leaderboard written to: {}", path);
    }

    Ok(())
}
