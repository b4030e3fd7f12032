//! Edge case & boundary tests
//!
//! Behavior at the edges of every input domain:
//! - Zero and maximum XP, level 0, unknown rank codes
//! - Streak thresholds and combo boundaries
//! - Empty goal profiles and zero-sized batches
//! - Malformed catalog data (fails closed, never panics)
//! - Status transitions outside Active

use chrono::{TimeZone, Utc};
use serde_json::json;

use hunter_core::config::SystemConfig;
use hunter_core::hunter::{class_stat_gain, HunterClass, HunterGoals, StatKind};
use hunter_core::progression::reward::{
    calculate_quest_xp, combo_bonus, perfect_day_bonus, streak_multiplier, RewardInput,
};
use hunter_core::progression::{
    calculate_level, rank_for_level, resolve_level, xp_required_for_level,
};
use hunter_core::quest::{GeneratedQuest, QuestCategory, QuestStatus, QuestType};
use hunter_core::questgen::templates::BOSS_TEMPLATES;
use hunter_core::questgen::{
    generate_daily_quests, generate_weekly_boss, priority_categories, seeded_rng,
};
use hunter_core::titles::{equip_title, UnlockRequirement};
use hunter_core::Rank;

// ============================================================
// 1. XP & level boundaries
// ============================================================

#[test]
fn test_zero_xp_is_level_one() {
    let r = resolve_level(0);
    assert_eq!((r.level, r.current_xp), (1, 0));
    let result = calculate_level(0);
    assert_eq!(result.old_level, 1);
    assert!(!result.ascension_triggered);
}

#[test]
fn test_max_xp_terminates() {
    let r = resolve_level(u64::MAX);
    assert!(r.level > 1_000);
    assert!(r.current_xp < xp_required_for_level(r.level + 1));
}

#[test]
fn test_exact_threshold_levels_up() {
    assert_eq!(resolve_level(281).level, 1);
    assert_eq!(resolve_level(282).level, 2);
    let result = calculate_level(282);
    assert_eq!((result.old_level, result.new_level), (1, 2));
    assert!(result.ascension_triggered);
    assert_eq!(result.remaining_xp, 0);
}

#[test]
fn test_level_zero_curve_and_rank() {
    assert_eq!(xp_required_for_level(0), 0);
    assert_eq!(rank_for_level(0), Rank::E);
}

#[test]
fn test_rank_codes_are_case_sensitive() {
    assert_eq!(Rank::from_code("SSS"), Some(Rank::SSS));
    assert_eq!(Rank::from_code("sss"), None);
    assert_eq!(Rank::from_code(""), None);
    assert_eq!(Rank::from_code("F"), None);
}

// ============================================================
// 2. Reward boundaries
// ============================================================

#[test]
fn test_streak_thresholds() {
    assert_eq!(streak_multiplier(6, false), 1.0);
    assert_eq!(streak_multiplier(7, false), 1.25);
    assert_eq!(streak_multiplier(13, false), 1.25);
    assert_eq!(streak_multiplier(14, false), 1.5);
    assert_eq!(streak_multiplier(29, false), 1.5);
    assert_eq!(streak_multiplier(30, false), 2.0);
    assert_eq!(streak_multiplier(u32::MAX, false), 2.0);
    assert_eq!(streak_multiplier(u32::MAX, true), 0.5);
}

#[test]
fn test_combo_boundaries() {
    assert_eq!(combo_bonus(0), 0);
    assert_eq!(combo_bonus(2), 0);
    assert_eq!(combo_bonus(3), 200);
    assert_eq!(combo_bonus(4), 200);
    assert_eq!(combo_bonus(5), 500);
    assert_eq!(combo_bonus(u32::MAX), 500);
}

#[test]
fn test_perfect_day_combinations() {
    assert_eq!(perfect_day_bonus(false, false), 0);
    assert_eq!(perfect_day_bonus(true, false), 1000);
    assert_eq!(perfect_day_bonus(false, true), 2000);
    assert_eq!(perfect_day_bonus(true, true), 3000);
}

#[test]
fn test_zero_base_xp_rewards_nothing() {
    let calc = calculate_quest_xp(RewardInput {
        base_xp: 0,
        level: 200,
        streak: 30,
        penalty_mode: false,
        quest_type: QuestType::Raid,
    });
    assert_eq!(calc.total_xp, 0);
    assert_eq!(calc.bonus_xp, 0);
}

#[test]
fn test_raid_reward_breakdown() {
    let calc = calculate_quest_xp(RewardInput {
        base_xp: 100,
        level: 0,
        streak: 0,
        penalty_mode: false,
        quest_type: QuestType::Raid,
    });
    assert_eq!(calc.total_xp, 200);
    assert!(calc.breakdown.iter().any(|l| l.starts_with("Raid Quest Bonus")));
}

#[test]
fn test_class_stat_gain_edges() {
    assert_eq!(class_stat_gain(None, 50), None);
    // floor(4 / 5) == 0 grants nothing
    assert_eq!(class_stat_gain(Some(HunterClass::Mage), 4), None);
    let gain = class_stat_gain(Some(HunterClass::ShadowMonarch), 12).unwrap();
    assert_eq!((gain.stat, gain.amount), (StatKind::Willpower, 2));
}

// ============================================================
// 3. Generation boundaries
// ============================================================

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 23, 59, 58).unwrap()
}

#[test]
fn test_zero_count_batch_is_empty() {
    let quests =
        generate_daily_quests(&HunterGoals::default(), 10, 0, 0, now(), &mut seeded_rng(1));
    assert!(quests.is_empty());
}

#[test]
fn test_empty_profile_uses_round_robin() {
    assert_eq!(
        priority_categories(&HunterGoals::default()),
        vec![
            QuestCategory::Mind,
            QuestCategory::Business,
            QuestCategory::Skill,
            QuestCategory::Physical,
            QuestCategory::Mind,
        ]
    );
}

#[test]
fn test_due_date_late_in_day() {
    let quests = generate_daily_quests(&HunterGoals::default(), 1, 0, 3, now(), &mut seeded_rng(9));
    for q in quests {
        assert!(q.due_date >= now());
        assert_eq!(q.due_date.date_naive(), now().date_naive());
    }
}

#[test]
fn test_boss_without_weaknesses_never_leaks_placeholder() {
    let goals = HunterGoals::default();
    for seed in 0..200 {
        let boss = generate_weekly_boss(&goals, 30, 5, now(), &mut seeded_rng(seed));
        assert!(!boss.title.contains('{'), "{}", boss.title);
        assert_eq!(boss.quest_type, QuestType::Boss);
        assert!(BOSS_TEMPLATES.iter().any(|b| boss.description.ends_with(b.boss_name)));
    }
}

#[test]
fn test_generated_quest_starts_active() {
    let generated = GeneratedQuest {
        title: "Run 5 kilometers".into(),
        description: "Build endurance".into(),
        category: QuestCategory::Physical,
        quest_type: QuestType::Daily,
        xp_reward: 250,
        difficulty: 1,
        due_date: now(),
    };
    let mut quest = generated.into_quest("q1", "h1", now());
    assert_eq!(quest.status, QuestStatus::Active);
    assert!(quest.complete(now()));
    assert!(!quest.complete(now()), "second completion must be refused");
    assert_eq!(quest.status, QuestStatus::Completed);
}

// ============================================================
// 4. Malformed catalog data
// ============================================================

#[test]
fn test_weird_requirement_json_fails_closed() {
    let samples = [
        json!({}),
        json!([]),
        json!(42),
        json!({"type": 5, "value": 1}),
        json!({"type": "level", "value": 1.5}),
        json!({"type": "level", "value": 99_999_999_999u64}),
        json!({"type": "stat", "value": 10}),
        json!({"type": "category_completed", "category": "cooking", "value": 1}),
        json!({"TYPE": "level", "value": 1}),
    ];
    for raw in samples {
        assert_eq!(UnlockRequirement::from_json(&raw), UnlockRequirement::Unrecognized, "{raw}");
    }
}

#[test]
fn test_equip_on_empty_collection() {
    let mut owned = Vec::new();
    assert!(!equip_title(&mut owned, "rank-s"));
}

// ============================================================
// 5. Config boundaries
// ============================================================

#[test]
fn test_empty_config_object_takes_defaults() {
    assert_eq!(SystemConfig::from_json_str("{}").unwrap(), SystemConfig::default());
    assert_eq!(SystemConfig::from_ron_str("()").unwrap(), SystemConfig::default());
}
