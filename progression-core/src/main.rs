//! hunter-sim: progression pacing and demo runner
//!
//! Usage:
//!   hunter-sim --hunters 1000 --days 90 --rate 0.8 --seed 42
//!   hunter-sim --demo --days 14
//!   hunter-sim --config hunter.ron ...
//!
//! Prints a JSON report on stdout; logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};

use hunter_core::balance::{run_progression_simulation, SimConfig};
use hunter_core::config::SystemConfig;
use hunter_core::logging::{init_tracing, LoggingSnapshot};
use hunter_core::questgen::{quest_seed, seeded_rng};
use hunter_core::repository::InMemoryHunterRepository;
use hunter_core::{Hunter, HunterClass, HunterGoals, QuestStatus, SystemController};

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_num_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    parse_str_arg(args, flag).and_then(|v| v.parse().ok())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => SystemConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => SystemConfig::default(),
    };
    init_tracing(&config.tracing);
    tracing::debug!(
        logging = %LoggingSnapshot::capture(&config.tracing).to_json(),
        "logging configured"
    );

    let days: u32 = parse_num_arg(&args, "--days").unwrap_or(90);

    if args.iter().any(|a| a == "--demo") {
        return run_demo(config, days).await;
    }

    let sim = SimConfig {
        hunter_count: parse_num_arg(&args, "--hunters").unwrap_or(1_000),
        days,
        completion_rate: parse_num_arg(&args, "--rate").unwrap_or(0.8),
        daily_quest_count: config.daily_quest_count,
        base_seed: parse_num_arg(&args, "--seed").unwrap_or(42),
    };
    anyhow::ensure!(
        (0.0..=1.0).contains(&sim.completion_rate),
        "--rate must be within 0..=1, got {}",
        sim.completion_rate
    );

    let report = run_progression_simulation(&sim);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Drive one hunter through the controller, completing every quest each day
async fn run_demo(config: SystemConfig, days: u32) -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryHunterRepository::new());
    repo.insert_hunter(Hunter::new("demo", "Sung").with_class(HunterClass::ShadowMonarch));
    repo.set_goals(
        "demo",
        HunterGoals {
            primary_goal: "Scale my sales agency".into(),
            skillset: vec!["AI engineering".into()],
            daily_availability: 8,
            weaknesses: vec!["procrastination".into()],
            long_term_mission: None,
        },
    );

    let controller = SystemController::new(repo.clone(), config);
    let start = Utc::now();
    let mut results = Vec::new();

    for day in 0..days {
        let now = start + Duration::days(i64::from(day));
        controller.refresh_quests("demo", now).await?;
        let mut raid_rng = seeded_rng(quest_seed("demo-raid", now.date_naive()));
        controller.generate_raid_for_hunter("demo", now, &mut raid_rng).await?;

        let active: Vec<String> = repo
            .quests_for("demo")
            .into_iter()
            .filter(|q| q.status == QuestStatus::Active)
            .map(|q| q.id)
            .collect();
        for quest_id in active {
            let result = controller.complete_quest(&quest_id, "demo", now).await?;
            if result.presentation.main_event.is_some() {
                results.push(result);
            }
        }
    }

    let hunter = repo.hunter("demo").context("demo hunter vanished")?;
    let summary = serde_json::json!({
        "hunter": hunter,
        "highlights": results,
        "ascension_log": repo.ascension_log("demo"),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
