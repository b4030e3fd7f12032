//! Monte-Carlo Progression Simulation
//!
//! Simulates thousands of hunters grinding generated quests for a number of
//! days to check the pacing of the XP curve and rank ladder. Each run has
//! its own seeded Xoshiro; runs execute in parallel with rayon.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::constants::{BOSS_UNLOCK_MIN_LEVEL, DEFAULT_DAILY_QUEST_COUNT};
use crate::hunter::{Hunter, HunterClass, HunterGoals};
use crate::progression::{calculate_quest_xp, combo_bonus, perfect_day_bonus, Rank, RewardInput};
use crate::questgen::rng::{pick, seeded_rng};
use crate::questgen::{generate_daily_quests, generate_weekly_boss};
use crate::quest::GeneratedQuest;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub hunter_count: u64,
    pub days: u32,
    /// Chance each generated quest gets completed
    pub completion_rate: f64,
    pub daily_quest_count: usize,
    pub base_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            hunter_count: 1_000,
            days: 90,
            completion_rate: 0.8,
            daily_quest_count: DEFAULT_DAILY_QUEST_COUNT,
            base_seed: 42,
        }
    }
}

/// Outcome of one simulated hunter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HunterRun {
    pub final_level: u32,
    pub final_rank: Rank,
    pub total_xp: u64,
    pub longest_streak: u32,
    pub quests_completed: u32,
    /// First day (1-based) each rank above E was reached
    pub days_to_rank: Vec<(Rank, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub total_runs: u64,
    pub days: u32,
    pub avg_final_level: f64,
    pub min_final_level: u32,
    pub max_final_level: u32,
    pub avg_total_xp: f64,
    pub rank_distribution: Vec<(Rank, u64)>,
    /// Mean days to reach each rank among runs that reached it, with that count
    pub avg_days_to_rank: Vec<(Rank, Option<f64>, u64)>,
}

fn run_seed(base_seed: u64, run: u64) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(run.to_le_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[0..8]);
    u64::from_le_bytes(bytes)
}

fn sample_goals<R: Rng + ?Sized>(rng: &mut R) -> HunterGoals {
    let goals = ["Grow my sales business", "Ship side projects", "Get healthy", ""];
    let skills = ["AI engineering", "coding", "design", "writing"];
    let weaknesses = ["procrastination", "fitness", "health", "focus"];
    HunterGoals {
        primary_goal: pick(&goals, rng).copied().unwrap_or_default().to_string(),
        skillset: pick(&skills, rng).map(|s| vec![s.to_string()]).unwrap_or_default(),
        daily_availability: 8,
        weaknesses: pick(&weaknesses, rng).map(|s| vec![s.to_string()]).unwrap_or_default(),
        long_term_mission: None,
    }
}

fn credit<R: Rng + ?Sized>(
    hunter: &mut Hunter,
    quest: &GeneratedQuest,
    completed_today: &mut u32,
    completion_rate: f64,
    rng: &mut R,
) -> bool {
    if rng.gen::<f64>() >= completion_rate {
        return false;
    }
    let reward = calculate_quest_xp(RewardInput {
        base_xp: quest.xp_reward,
        level: hunter.level,
        streak: hunter.current_streak,
        penalty_mode: hunter.penalty_mode,
        quest_type: quest.quest_type,
    });
    *completed_today += 1;
    let gained = reward.total_xp.saturating_add(combo_bonus(*completed_today));
    hunter.total_xp = hunter.total_xp.saturating_add(gained);
    hunter.sync_progression();
    true
}

/// Simulate one hunter for `config.days` days
pub fn simulate_hunter(seed: u64, config: &SimConfig) -> HunterRun {
    let mut rng = seeded_rng(seed);
    let goals = sample_goals(&mut rng);
    let class = *pick(&HunterClass::ALL, &mut rng).unwrap_or(&HunterClass::Warrior);
    let mut hunter = Hunter::new(format!("sim-{seed:x}"), "sim").with_class(class);

    let start: DateTime<Utc> = Utc
        .with_ymd_and_hms(2026, 1, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let mut quests_completed = 0u32;
    let mut days_to_rank: Vec<(Rank, u32)> = Vec::new();
    let mut boss: Option<GeneratedQuest> = None;

    for day in 0..config.days {
        let now = start + Duration::days(i64::from(day));
        let dailies = generate_daily_quests(
            &goals,
            hunter.level,
            hunter.current_streak,
            config.daily_quest_count,
            now,
            &mut rng,
        );

        let mut completed_today = 0u32;
        for quest in &dailies {
            if credit(&mut hunter, quest, &mut completed_today, config.completion_rate, &mut rng) {
                quests_completed += 1;
            }
        }
        let all_dailies = !dailies.is_empty() && completed_today as usize == dailies.len();

        if boss.is_none() && hunter.level >= BOSS_UNLOCK_MIN_LEVEL {
            boss = Some(generate_weekly_boss(
                &goals,
                hunter.level,
                hunter.current_streak,
                now,
                &mut rng,
            ));
        }
        let mut boss_done = false;
        if let Some(active) = boss.take() {
            if active.due_date <= now + Duration::days(1) {
                boss_done = credit(
                    &mut hunter,
                    &active,
                    &mut completed_today,
                    config.completion_rate,
                    &mut rng,
                );
                quests_completed += u32::from(boss_done);
            } else {
                boss = Some(active);
            }
        }

        let bonus = perfect_day_bonus(all_dailies, boss_done);
        if bonus > 0 {
            hunter.total_xp = hunter.total_xp.saturating_add(bonus);
            hunter.sync_progression();
        }

        if completed_today > 0 {
            let streak = hunter.current_streak + 1;
            hunter = hunter.with_streak(streak);
            hunter.penalty_mode = false;
        } else {
            hunter.current_streak = 0;
            hunter.penalty_mode = true;
        }

        for rank in Rank::all().into_iter().filter(|r| *r != Rank::E && *r <= hunter.rank) {
            if !days_to_rank.iter().any(|(r, _)| *r == rank) {
                days_to_rank.push((rank, day + 1));
            }
        }
    }

    HunterRun {
        final_level: hunter.level,
        final_rank: hunter.rank,
        total_xp: hunter.total_xp,
        longest_streak: hunter.longest_streak,
        quests_completed,
        days_to_rank,
    }
}

/// Run the Monte-Carlo simulation with rayon parallelism
pub fn run_progression_simulation(config: &SimConfig) -> BalanceReport {
    let seeds: Vec<u64> = (0..config.hunter_count)
        .map(|i| run_seed(config.base_seed, i))
        .collect();

    let runs: Vec<HunterRun> = seeds
        .par_iter()
        .map(|seed| simulate_hunter(*seed, config))
        .collect();

    tracing::debug!(runs = runs.len(), days = config.days, "progression simulation finished");
    analyze_runs(&runs, config.days)
}

fn analyze_runs(runs: &[HunterRun], days: u32) -> BalanceReport {
    let n = runs.len().max(1) as f64;
    let avg_final_level = runs.iter().map(|r| f64::from(r.final_level)).sum::<f64>() / n;
    let avg_total_xp = runs.iter().map(|r| r.total_xp as f64).sum::<f64>() / n;

    let rank_distribution = Rank::all()
        .into_iter()
        .map(|rank| (rank, runs.iter().filter(|r| r.final_rank == rank).count() as u64))
        .collect();

    let avg_days_to_rank = Rank::all()
        .into_iter()
        .filter(|r| *r != Rank::E)
        .map(|rank| {
            let reached: Vec<u32> = runs
                .iter()
                .filter_map(|r| r.days_to_rank.iter().find(|(k, _)| *k == rank).map(|(_, d)| *d))
                .collect();
            let avg = (!reached.is_empty())
                .then(|| reached.iter().map(|d| f64::from(*d)).sum::<f64>() / reached.len() as f64);
            (rank, avg, reached.len() as u64)
        })
        .collect();

    BalanceReport {
        total_runs: runs.len() as u64,
        days,
        avg_final_level,
        min_final_level: runs.iter().map(|r| r.final_level).min().unwrap_or(1),
        max_final_level: runs.iter().map(|r| r.final_level).max().unwrap_or(1),
        avg_total_xp,
        rank_distribution,
        avg_days_to_rank,
    }
}
