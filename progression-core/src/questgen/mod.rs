//! Quest generation
//!
//! Builds daily, weekly boss and raid quests from the template pools:
//! - Category slots are biased by the hunter's goals, skills and weaknesses
//! - Template choice within a slot is uniform
//! - Target values scale with level and streak; XP scales with level
//!
//! All randomness comes through the caller's `Rng`.

pub mod difficulty;
pub mod rng;
pub mod templates;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::constants::{BOSS_DUE_DAYS, BOSS_LEVEL_BONUS_PER_LEVEL, RAID_DUE_DAYS};
use crate::hunter::HunterGoals;
use crate::progression::reward::level_bonus;
use crate::quest::{GeneratedQuest, QuestCategory, QuestType};

pub use difficulty::{
    difficulty_multiplier, scale_quest_difficulty, should_unlock_boss_quest,
    should_unlock_raid_quest,
};
pub use rng::{pick, quest_seed, seeded_rng, QuestRng};
pub use templates::{BossTemplate, QuestTemplate};

use difficulty::scaled_value;
use rng::{roll_above, uniform_index};
use templates::{
    bosses_in, daily_pool, shadow_self, BOSS_TEMPLATES, RAID_TEMPLATES, VALUE_PLACEHOLDER,
    WEAKNESS_PLACEHOLDER,
};

const BUSINESS_GOAL_KEYWORDS: [&str; 3] = ["business", "sales", "client"];
const SKILL_KEYWORDS: [&str; 3] = ["ai", "coding", "engineering"];
const HEALTH_WEAKNESS_KEYWORDS: [&str; 2] = ["fitness", "health"];

const BOSS_BUSINESS_KEYWORDS: [&str; 2] = ["business", "sales"];
const BOSS_SKILL_KEYWORDS: [&str; 2] = ["ai", "coding"];

/// Substituted for `{weakness}` when the hunter listed none
const DEFAULT_WEAKNESS: &str = "Inner Weakness";

/// Last millisecond of the UTC day containing `at`
pub fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc())
        .unwrap_or(at)
}

/// Category slot order for a hunter's dailies.
///
/// Matched interests appear twice, Mind always once; short lists are padded
/// with the full round-robin.
pub fn priority_categories(goals: &HunterGoals) -> Vec<QuestCategory> {
    let mut categories = Vec::with_capacity(8);

    if goals.goal_mentions(&BUSINESS_GOAL_KEYWORDS) {
        categories.extend([QuestCategory::Business, QuestCategory::Business]);
    }
    if goals.skills_mention(&SKILL_KEYWORDS) {
        categories.extend([QuestCategory::Skill, QuestCategory::Skill]);
    }
    if goals.weaknesses_mention(&HEALTH_WEAKNESS_KEYWORDS) {
        categories.extend([QuestCategory::Physical, QuestCategory::Physical]);
    }
    categories.push(QuestCategory::Mind);

    if categories.len() < 4 {
        categories.extend(QuestCategory::all());
    }
    categories
}

/// One daily quest from `category`'s pool
pub fn generate_daily_quest<R: Rng + ?Sized>(
    category: QuestCategory,
    level: u32,
    difficulty: f64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> GeneratedQuest {
    let pool = daily_pool(category);
    let template = &pool[uniform_index(rng, pool.len())];
    build_quest(template, QuestType::Daily, level, difficulty, end_of_day(now))
}

/// `count` dailies, slot i drawn from `priority_categories[i % len]`
pub fn generate_daily_quests<R: Rng + ?Sized>(
    goals: &HunterGoals,
    level: u32,
    streak: u32,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<GeneratedQuest> {
    let difficulty = difficulty_multiplier(level, streak);
    let categories = priority_categories(goals);

    (0..count)
        .map(|i| {
            let category = categories[i % categories.len()];
            generate_daily_quest(category, level, difficulty, now, rng)
        })
        .collect()
}

/// Pick the weekly boss, weighted toward the hunter's profile.
pub fn select_boss<R: Rng + ?Sized>(goals: &HunterGoals, rng: &mut R) -> &'static BossTemplate {
    if goals.goal_mentions(&BOSS_BUSINESS_KEYWORDS) && roll_above(rng, 0.5) {
        let bosses = bosses_in(QuestCategory::Business);
        if !bosses.is_empty() {
            return bosses[uniform_index(rng, bosses.len().min(2))];
        }
    }

    if goals.skills_mention(&BOSS_SKILL_KEYWORDS) && roll_above(rng, 0.5) {
        let bosses = bosses_in(QuestCategory::Skill);
        if !bosses.is_empty() {
            return bosses[uniform_index(rng, bosses.len().min(2))];
        }
    }

    if !goals.weaknesses.is_empty() && roll_above(rng, 0.7) {
        return shadow_self();
    }

    &BOSS_TEMPLATES[uniform_index(rng, BOSS_TEMPLATES.len())]
}

/// Weekly boss quest, due end of day seven days out
pub fn generate_weekly_boss<R: Rng + ?Sized>(
    goals: &HunterGoals,
    level: u32,
    streak: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> GeneratedQuest {
    let template = select_boss(goals, rng);
    let difficulty = difficulty_multiplier(level, streak);
    let value = scaled_value(template.base_value, difficulty);

    let weakness = goals
        .weaknesses
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_WEAKNESS);
    let title = template
        .title_template
        .replace(VALUE_PLACEHOLDER, &value.to_string())
        .replace(WEAKNESS_PLACEHOLDER, weakness);

    let boss_bonus = 1.0 + level as f64 * BOSS_LEVEL_BONUS_PER_LEVEL;

    GeneratedQuest {
        title,
        description: format!("{}\n\nBoss: {}", template.description, template.boss_name),
        category: template.category,
        quest_type: QuestType::Boss,
        xp_reward: (template.base_xp as f64 * boss_bonus).floor() as u64,
        difficulty: level,
        due_date: end_of_day(now + Duration::days(BOSS_DUE_DAYS)),
    }
}

/// Month-long raid quest; values follow the plain level curve, no streak factor
pub fn generate_raid_quest<R: Rng + ?Sized>(
    level: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> GeneratedQuest {
    let template = &RAID_TEMPLATES[uniform_index(rng, RAID_TEMPLATES.len())];
    let value = scale_quest_difficulty(template.base_value, level);

    GeneratedQuest {
        title: template.render_title(value),
        description: template.description.to_string(),
        category: template.category,
        quest_type: QuestType::Raid,
        xp_reward: (template.base_xp as f64 * level_bonus(level)).floor() as u64,
        difficulty: level,
        due_date: now + Duration::days(RAID_DUE_DAYS),
    }
}

fn build_quest(
    template: &QuestTemplate,
    quest_type: QuestType,
    level: u32,
    difficulty: f64,
    due_date: DateTime<Utc>,
) -> GeneratedQuest {
    let value = scaled_value(template.base_value, difficulty);
    GeneratedQuest {
        title: template.render_title(value),
        description: template.description.to_string(),
        category: template.category,
        quest_type,
        xp_reward: (template.base_xp as f64 * level_bonus(level)).floor() as u64,
        difficulty: level,
        due_date,
    }
}

#[cfg(test)]
mod tests {
    use super::rng::testing::ScriptedRng;
    use super::*;
    use chrono::{TimeZone, Timelike};
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn goals(goal: &str, skills: &[&str], weaknesses: &[&str]) -> HunterGoals {
        HunterGoals {
            primary_goal: goal.into(),
            skillset: skills.iter().map(|s| s.to_string()).collect(),
            daily_availability: 8,
            weaknesses: weaknesses.iter().map(|s| s.to_string()).collect(),
            long_term_mission: None,
        }
    }

    #[test]
    fn test_priority_categories_fallback() {
        let cats = priority_categories(&HunterGoals::default());
        assert_eq!(
            cats,
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
    fn test_priority_categories_full_profile() {
        let cats = priority_categories(&goals(
            "Scale my sales agency",
            &["AI engineering"],
            &["fitness"],
        ));
        assert_eq!(
            cats,
            vec![
                QuestCategory::Business,
                QuestCategory::Business,
                QuestCategory::Skill,
                QuestCategory::Skill,
                QuestCategory::Physical,
                QuestCategory::Physical,
                QuestCategory::Mind,
            ]
        );
    }

    #[test]
    fn test_single_match_still_pads() {
        // Business x2 + Mind = 3 < 4, so the round-robin is appended
        let cats = priority_categories(&goals("find clients", &[], &[]));
        assert_eq!(cats.len(), 7);
        assert_eq!(
            &cats[..3],
            &[QuestCategory::Business, QuestCategory::Business, QuestCategory::Mind]
        );
    }

    #[test]
    fn test_daily_quests_follow_slot_order() {
        let g = goals("grow my business", &["coding"], &[]);
        let quests = generate_daily_quests(&g, 1, 0, 5, now(), &mut seeded_rng(3));
        let cats: Vec<_> = quests.iter().map(|q| q.category).collect();
        assert_eq!(
            cats,
            vec![
                QuestCategory::Business,
                QuestCategory::Business,
                QuestCategory::Skill,
                QuestCategory::Skill,
                QuestCategory::Mind,
            ]
        );
        assert!(quests.iter().all(|q| q.quest_type == QuestType::Daily));
        assert!(quests.iter().all(|q| !q.title.contains(VALUE_PLACEHOLDER)));
    }

    #[test]
    fn test_daily_quest_values_and_due_date() {
        // level 10, streak 0: difficulty 1.3225, xp bonus 2.0
        let quest = generate_daily_quest(
            QuestCategory::Mind,
            10,
            difficulty_multiplier(10, 0),
            now(),
            &mut ScriptedRng::low(),
        );
        assert_eq!(quest.title, "Meditate for 26 minutes");
        assert_eq!(quest.xp_reward, 360);
        assert_eq!(quest.difficulty, 10);
        assert_eq!(quest.due_date.date_naive(), now().date_naive());
        assert_eq!(quest.due_date.hour(), 23);
        assert_eq!(quest.due_date.minute(), 59);
    }

    #[test]
    fn test_daily_selection_edges() {
        let first =
            generate_daily_quest(QuestCategory::Physical, 1, 1.0, now(), &mut ScriptedRng::low());
        let last =
            generate_daily_quest(QuestCategory::Physical, 1, 1.0, now(), &mut ScriptedRng::high());
        assert!(first.title.contains("push-ups"));
        assert!(last.title.contains("plank"));
    }

    #[test]
    fn test_daily_selection_distribution() {
        let mut rng = seeded_rng(2024);
        let mut seen: HashMap<String, u32> = HashMap::new();
        for _ in 0..1000 {
            let q = generate_daily_quest(QuestCategory::Skill, 1, 1.0, now(), &mut rng);
            *seen.entry(q.title).or_default() += 1;
        }
        assert_eq!(seen.len(), 5, "every template should appear");
        assert!(seen.values().all(|&n| n > 120));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let g = goals("sales", &["ai"], &["health"]);
        let a = generate_daily_quests(&g, 12, 4, 5, now(), &mut seeded_rng(77));
        let b = generate_daily_quests(&g, 12, 4, 5, now(), &mut seeded_rng(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_boss_business_branch() {
        // First roll high passes the 50% gate, second roll high picks the second business boss
        let boss = select_boss(&goals("business growth", &[], &[]), &mut ScriptedRng::high());
        assert_eq!(boss.boss_name, "The Wealth Dragon");

        let boss = select_boss(&goals("business growth", &[], &[]), &mut ScriptedRng::low());
        // Gate fails, then uniform over all with a low roll
        assert_eq!(boss.boss_name, "The Prospector King");
    }

    #[test]
    fn test_boss_weakness_branch() {
        let boss = select_boss(&goals("", &[], &["procrastination"]), &mut ScriptedRng::high());
        assert_eq!(boss.boss_name, "The Shadow Self");
    }

    #[test]
    fn test_boss_uniform_without_profile() {
        let boss = select_boss(&HunterGoals::default(), &mut ScriptedRng::high());
        assert_eq!(boss.boss_name, "The Shadow Self");
        let mut rng = seeded_rng(5);
        let mut names = std::collections::HashSet::new();
        for _ in 0..500 {
            names.insert(select_boss(&HunterGoals::default(), &mut rng).boss_name);
        }
        assert_eq!(names.len(), BOSS_TEMPLATES.len());
    }

    #[test]
    fn test_weekly_boss_quest() {
        let g = goals("", &[], &["procrastination"]);
        let quest = generate_weekly_boss(&g, 10, 0, now(), &mut ScriptedRng::high());
        assert_eq!(quest.title, "BOSS RAID: Overcome Your procrastination");
        assert_eq!(quest.quest_type, QuestType::Boss);
        assert!(quest.description.ends_with("Boss: The Shadow Self"));
        // 2200 * (1 + 10 * 0.15) = 5500
        assert_eq!(quest.xp_reward, 5500);
        assert_eq!(
            quest.due_date.date_naive(),
            (now() + Duration::days(7)).date_naive()
        );
    }

    #[test]
    fn test_shadow_self_without_weakness_uses_default() {
        let quest =
            generate_weekly_boss(&HunterGoals::default(), 5, 0, now(), &mut ScriptedRng::high());
        assert_eq!(quest.title, "BOSS RAID: Overcome Your Inner Weakness");
    }

    #[test]
    fn test_raid_quest() {
        let quest = generate_raid_quest(30, now(), &mut ScriptedRng::low());
        assert_eq!(quest.quest_type, QuestType::Raid);
        assert_eq!(quest.category, QuestCategory::Business);
        // 5000 * (1 + 30 * 0.1) = 20000
        assert_eq!(quest.xp_reward, 20000);
        assert_eq!(quest.due_date, now() + Duration::days(30));
    }
}
