//! Quest reward calculation
//!
//! total = floor(base * level_bonus * streak_mult * type_mult)
//! Combo and perfect-day bonuses are flat and added on top by the caller.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOSS_QUEST_MULT, COMBO_LARGE_BONUS, COMBO_LARGE_THRESHOLD, COMBO_SMALL_BONUS,
    COMBO_SMALL_THRESHOLD, LEVEL_BONUS_PER_LEVEL, PENALTY_MODE_MULT, PERFECT_DAY_BOSS_BONUS,
    PERFECT_DAY_DAILY_BONUS, RAID_QUEST_MULT,
};
use crate::quest::QuestType;

/// Inputs to the reward formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardInput {
    pub base_xp: u64,
    pub level: u32,
    pub streak: u32,
    pub penalty_mode: bool,
    pub quest_type: QuestType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpCalculation {
    pub base_xp: u64,
    pub multiplier: f64,
    /// May be negative under penalty mode
    pub bonus_xp: i64,
    pub total_xp: u64,
    pub breakdown: Vec<String>,
}

pub fn level_bonus(level: u32) -> f64 {
    1.0 + level as f64 * LEVEL_BONUS_PER_LEVEL
}

/// Highest threshold wins; penalty mode overrides any streak.
pub fn streak_multiplier(streak: u32, penalty_mode: bool) -> f64 {
    if penalty_mode {
        return PENALTY_MODE_MULT;
    }
    match streak {
        30.. => 2.0,
        14..=29 => 1.5,
        7..=13 => 1.25,
        _ => 1.0,
    }
}

pub fn quest_type_multiplier(quest_type: QuestType) -> f64 {
    match quest_type {
        QuestType::Boss => BOSS_QUEST_MULT,
        QuestType::Raid => RAID_QUEST_MULT,
        QuestType::Daily | QuestType::Optional => 1.0,
    }
}

pub fn calculate_quest_xp(input: RewardInput) -> XpCalculation {
    let mut breakdown = vec![format!("Base XP: {}", input.base_xp)];

    let level_mult = level_bonus(input.level);
    breakdown.push(format!("Level Bonus: x{:.2}", level_mult));

    let streak_mult = streak_multiplier(input.streak, input.penalty_mode);
    breakdown.push(format!("Streak Multiplier: x{:.2}", streak_mult));

    let type_mult = quest_type_multiplier(input.quest_type);
    match input.quest_type {
        QuestType::Boss => breakdown.push(format!("Boss Quest Bonus: x{:.1}", type_mult)),
        QuestType::Raid => breakdown.push(format!("Raid Quest Bonus: x{:.1}", type_mult)),
        _ => {}
    }

    let multiplier = level_mult * streak_mult * type_mult;
    let total_xp = (input.base_xp as f64 * multiplier).floor() as u64;

    XpCalculation {
        base_xp: input.base_xp,
        multiplier,
        bonus_xp: total_xp as i64 - input.base_xp as i64,
        total_xp,
        breakdown,
    }
}

/// Flat same-day bonus. `completed_today` must include the quest being completed.
pub fn combo_bonus(completed_today: u32) -> u64 {
    if completed_today >= COMBO_LARGE_THRESHOLD {
        COMBO_LARGE_BONUS
    } else if completed_today >= COMBO_SMALL_THRESHOLD {
        COMBO_SMALL_BONUS
    } else {
        0
    }
}

pub fn perfect_day_bonus(all_dailies_completed: bool, boss_completed: bool) -> u64 {
    let mut bonus = 0;
    if all_dailies_completed {
        bonus += PERFECT_DAY_DAILY_BONUS;
    }
    if boss_completed {
        bonus += PERFECT_DAY_BOSS_BONUS;
    }
    bonus
}
