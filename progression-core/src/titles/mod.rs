//! Title catalog and unlock checks
//!
//! Titles are cosmetic achievements. Each carries exactly one unlock
//! requirement; the catalog is external configuration, so requirement data
//! that cannot be understood is kept as `Unrecognized` and never unlocks.
//!
//! A hunter may own many titles but wear at most one.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hunter::{Hunter, HunterStats, StatKind};
use crate::progression::rank::Rank;
use crate::quest::{QuestCategory, QuestCounts, QuestType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TitleRarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl TitleRarity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Common" => Some(Self::Common),
            "Rare" => Some(Self::Rare),
            "Epic" => Some(Self::Epic),
            "Legendary" => Some(Self::Legendary),
            "Mythic" => Some(Self::Mythic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
        }
    }
}

impl std::fmt::Display for TitleRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unlock condition per title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "Value")]
pub enum UnlockRequirement {
    Level { value: u32 },
    Rank { value: Rank },
    Streak { value: u32 },
    TotalXp { value: u64 },
    Stat { stat: StatKind, value: u32 },
    QuestCompleted { value: u32 },
    #[serde(rename = "quest_type")]
    QuestTypeCompleted { quest_type: QuestType, value: u32 },
    CategoryCompleted { category: QuestCategory, value: u32 },
    /// Anything the engine cannot interpret; always locked
    Unrecognized,
}

impl From<Value> for UnlockRequirement {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl UnlockRequirement {
    /// Parse loosely-typed catalog JSON, failing closed.
    pub fn from_json(raw: &Value) -> Self {
        let kind = raw.get("type").and_then(Value::as_str).unwrap_or_default();
        let number = || raw.get("value").and_then(Value::as_u64);
        let small = || number().and_then(|n| u32::try_from(n).ok());

        let parsed = match kind {
            "level" => small().map(|value| Self::Level { value }),
            "rank" => raw
                .get("value")
                .and_then(Value::as_str)
                .and_then(Rank::from_code)
                .map(|value| Self::Rank { value }),
            "streak" => small().map(|value| Self::Streak { value }),
            "total_xp" => number().map(|value| Self::TotalXp { value }),
            "stat" => raw
                .get("stat")
                .and_then(Value::as_str)
                .and_then(|s| StatKind::from_name(&s.to_lowercase()))
                .zip(small())
                .map(|(stat, value)| Self::Stat { stat, value }),
            "quest_completed" => small().map(|value| Self::QuestCompleted { value }),
            "quest_type" => raw
                .get("quest_type")
                .and_then(Value::as_str)
                .and_then(parse_quest_type)
                .zip(small())
                .map(|(quest_type, value)| Self::QuestTypeCompleted { quest_type, value }),
            "category_completed" => raw
                .get("category")
                .and_then(Value::as_str)
                .and_then(parse_category)
                .zip(small())
                .map(|(category, value)| Self::CategoryCompleted { category, value }),
            _ => None,
        };
        parsed.unwrap_or(Self::Unrecognized)
    }

    pub fn is_satisfied(&self, progress: &TitleProgress) -> bool {
        match self {
            Self::Level { value } => progress.level >= *value,
            Self::Rank { value } => progress.rank >= *value,
            Self::Streak { value } => progress.streak >= *value,
            Self::TotalXp { value } => progress.total_xp >= *value,
            Self::Stat { stat, value } => progress.stats.get(*stat) >= *value,
            Self::QuestCompleted { value } => progress.quest_counts.total >= *value,
            Self::QuestTypeCompleted { quest_type, value } => {
                progress.quest_counts.of_type(*quest_type) >= *value
            }
            Self::CategoryCompleted { category, value } => {
                progress.quest_counts.in_category(*category) >= *value
            }
            Self::Unrecognized => false,
        }
    }
}

fn parse_quest_type(raw: &str) -> Option<QuestType> {
    match raw.to_lowercase().as_str() {
        "daily" => Some(QuestType::Daily),
        "boss" => Some(QuestType::Boss),
        "raid" => Some(QuestType::Raid),
        "optional" => Some(QuestType::Optional),
        _ => None,
    }
}

fn parse_category(raw: &str) -> Option<QuestCategory> {
    match raw.to_lowercase().as_str() {
        "business" => Some(QuestCategory::Business),
        "skill" => Some(QuestCategory::Skill),
        "physical" => Some(QuestCategory::Physical),
        "mind" => Some(QuestCategory::Mind),
        _ => None,
    }
}

/// Catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub rarity: TitleRarity,
    pub unlock_requirement: UnlockRequirement,
    pub image_path: Option<String>,
}

/// Join row: a title owned by a hunter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HunterTitle {
    pub hunter_id: String,
    pub title_id: String,
    pub unlocked_at: DateTime<Utc>,
    pub is_active: bool,
}

/// A title unlocked by one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleUnlock {
    pub title: Title,
    pub unlocked_at: DateTime<Utc>,
}

/// Everything a requirement may look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProgress {
    pub level: u32,
    pub rank: Rank,
    pub streak: u32,
    pub total_xp: u64,
    pub stats: HunterStats,
    pub quest_counts: QuestCounts,
}

impl TitleProgress {
    pub fn from_hunter(hunter: &Hunter, stats: HunterStats, quest_counts: QuestCounts) -> Self {
        Self {
            level: hunter.level,
            rank: hunter.rank,
            streak: hunter.current_streak,
            total_xp: hunter.total_xp,
            stats,
            quest_counts,
        }
    }
}

/// Titles that newly unlock for `progress`.
///
/// Already-owned ids are skipped and a catalog id appearing twice unlocks once.
pub fn check_title_unlocks(
    catalog: &[Title],
    already_unlocked: &HashSet<String>,
    progress: &TitleProgress,
    now: DateTime<Utc>,
) -> Vec<TitleUnlock> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut newly_unlocked = Vec::new();

    for title in catalog {
        if already_unlocked.contains(&title.id) || !seen.insert(title.id.as_str()) {
            continue;
        }
        if title.unlock_requirement == UnlockRequirement::Unrecognized {
            tracing::warn!(
                title_id = %title.id,
                "unrecognized unlock requirement, title stays locked"
            );
            continue;
        }
        if title.unlock_requirement.is_satisfied(progress) {
            newly_unlocked.push(TitleUnlock {
                title: title.clone(),
                unlocked_at: now,
            });
        }
    }

    newly_unlocked
}

/// Fresh inactive ownership rows for newly unlocked titles
pub fn grant_titles(hunter_id: &str, unlocks: &[TitleUnlock]) -> Vec<HunterTitle> {
    unlocks
        .iter()
        .map(|u| HunterTitle {
            hunter_id: hunter_id.to_string(),
            title_id: u.title.id.clone(),
            unlocked_at: u.unlocked_at,
            is_active: false,
        })
        .collect()
}

/// Wear `title_id`, taking every other owned title off.
/// Returns false and changes nothing when the title is not owned.
pub fn equip_title(owned: &mut [HunterTitle], title_id: &str) -> bool {
    if !owned.iter().any(|t| t.title_id == title_id) {
        return false;
    }
    for t in owned.iter_mut() {
        t.is_active = t.title_id == title_id;
    }
    true
}

pub fn active_title(owned: &[HunterTitle]) -> Option<&HunterTitle> {
    owned.iter().find(|t| t.is_active)
}

fn title(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    rarity: TitleRarity,
    unlock_requirement: UnlockRequirement,
) -> Title {
    Title {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: category.into(),
        rarity,
        unlock_requirement,
        image_path: None,
    }
}

/// Built-in catalog used when the store has none
pub fn default_catalog() -> Vec<Title> {
    use TitleRarity::*;
    use UnlockRequirement as R;

    vec![
        // === Ascension ===
        title(
            "level-5",
            "The Reawakened",
            "Reach level 5.",
            "Ascension",
            Common,
            R::Level { value: 5 },
        ),
        title(
            "level-10",
            "Dungeon Initiate",
            "Reach level 10.",
            "Ascension",
            Common,
            R::Level { value: 10 },
        ),
        title(
            "level-25",
            "Gate Breaker",
            "Reach level 25.",
            "Ascension",
            Rare,
            R::Level { value: 25 },
        ),
        title(
            "level-50",
            "Half-Awakened",
            "Reach level 50.",
            "Ascension",
            Epic,
            R::Level { value: 50 },
        ),
        title(
            "level-75",
            "Power Unleashed",
            "Reach level 75.",
            "Ascension",
            Epic,
            R::Level { value: 75 },
        ),
        title(
            "level-100",
            "Centurion of Shadows",
            "Reach level 100.",
            "Ascension",
            Legendary,
            R::Level { value: 100 },
        ),
        // === Rank ===
        title(
            "rank-s",
            "S-Rank Hunter",
            "Attain S-Rank.",
            "Rank",
            Legendary,
            R::Rank { value: Rank::S },
        ),
        title(
            "rank-ss",
            "Shadow General",
            "Attain SS-Rank.",
            "Shadow",
            Legendary,
            R::Rank { value: Rank::SS },
        ),
        title(
            "rank-sss",
            "Shadow Monarch",
            "Attain SSS-Rank.",
            "Shadow",
            Mythic,
            R::Rank { value: Rank::SSS },
        ),
        // === Streak ===
        title(
            "streak-7",
            "Daily Grinder",
            "Keep a 7-day streak.",
            "Discipline",
            Common,
            R::Streak { value: 7 },
        ),
        title(
            "streak-30",
            "Iron Will",
            "Keep a 30-day streak.",
            "Discipline",
            Rare,
            R::Streak { value: 30 },
        ),
        title(
            "streak-100",
            "Unbroken",
            "Keep a 100-day streak.",
            "Discipline",
            Legendary,
            R::Streak { value: 100 },
        ),
        // === Quests ===
        title(
            "quests-100",
            "Quest Veteran",
            "Complete 100 quests.",
            "Quest",
            Rare,
            R::QuestCompleted { value: 100 },
        ),
        title(
            "quests-500",
            "Quest Conqueror",
            "Complete 500 quests.",
            "Quest",
            Epic,
            R::QuestCompleted { value: 500 },
        ),
        title(
            "boss-slayer",
            "Boss Slayer",
            "Defeat 10 weekly bosses.",
            "Quest",
            Epic,
            R::QuestTypeCompleted { quest_type: QuestType::Boss, value: 10 },
        ),
        title(
            "discipline-master",
            "Master of Discipline",
            "Raise discipline to 100.",
            "Discipline",
            Epic,
            R::Stat { stat: StatKind::Discipline, value: 100 },
        ),
    ]
}
