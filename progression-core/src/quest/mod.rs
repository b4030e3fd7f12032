//! Quest records
//!
//! A quest is created Active by the generator and moves to Completed exactly
//! once. Failed/Expired are set by outside housekeeping and never revert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestType {
    Daily,
    Boss,
    Raid,
    Optional,
}

impl QuestType {
    pub fn all() -> [QuestType; 4] {
        [Self::Daily, Self::Boss, Self::Raid, Self::Optional]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCategory {
    Business,
    Skill,
    Physical,
    Mind,
}

impl QuestCategory {
    /// Fallback round-robin order
    pub fn all() -> [QuestCategory; 4] {
        [Self::Business, Self::Skill, Self::Physical, Self::Mind]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub hunter_id: String,
    pub quest_type: QuestType,
    pub category: QuestCategory,
    pub title: String,
    pub description: Option<String>,
    /// Base reward before level/streak/type multipliers
    pub xp_reward: u64,
    /// Hunter level at creation
    pub difficulty: u32,
    pub status: QuestStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Quest {
    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    /// Active → Completed. Returns false (and changes nothing) from any other status.
    pub fn complete(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = QuestStatus::Completed;
        self.completed_at = Some(at);
        true
    }
}

/// Output of the quest generator, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuest {
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub quest_type: QuestType,
    pub xp_reward: u64,
    pub difficulty: u32,
    pub due_date: DateTime<Utc>,
}

impl GeneratedQuest {
    pub fn into_quest(
        self,
        id: impl Into<String>,
        hunter_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Quest {
        Quest {
            id: id.into(),
            hunter_id: hunter_id.into(),
            quest_type: self.quest_type,
            category: self.category,
            title: self.title,
            description: Some(self.description),
            xp_reward: self.xp_reward,
            difficulty: self.difficulty,
            status: QuestStatus::Active,
            due_date: Some(self.due_date),
            completed_at: None,
            created_at,
        }
    }
}

/// Completed-quest counters used by title requirements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCounts {
    pub total: u32,
    pub daily: u32,
    pub boss: u32,
    pub raid: u32,
    pub optional: u32,
    pub business: u32,
    pub skill: u32,
    pub physical: u32,
    pub mind: u32,
}

impl QuestCounts {
    pub fn of_type(&self, quest_type: QuestType) -> u32 {
        match quest_type {
            QuestType::Daily => self.daily,
            QuestType::Boss => self.boss,
            QuestType::Raid => self.raid,
            QuestType::Optional => self.optional,
        }
    }

    pub fn in_category(&self, category: QuestCategory) -> u32 {
        match category {
            QuestCategory::Business => self.business,
            QuestCategory::Skill => self.skill,
            QuestCategory::Physical => self.physical,
            QuestCategory::Mind => self.mind,
        }
    }

    /// Count one completed quest
    pub fn record(&mut self, quest_type: QuestType, category: QuestCategory) {
        self.total += 1;
        match quest_type {
            QuestType::Daily => self.daily += 1,
            QuestType::Boss => self.boss += 1,
            QuestType::Raid => self.raid += 1,
            QuestType::Optional => self.optional += 1,
        }
        match category {
            QuestCategory::Business => self.business += 1,
            QuestCategory::Skill => self.skill += 1,
            QuestCategory::Physical => self.physical += 1,
            QuestCategory::Mind => self.mind += 1,
        }
    }

    /// Tally counts from completed quests, ignoring any other status
    pub fn from_quests<'a>(quests: impl IntoIterator<Item = &'a Quest>) -> Self {
        let mut counts = Self::default();
        for quest in quests {
            if quest.status == QuestStatus::Completed {
                counts.record(quest.quest_type, quest.category);
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quest(status: QuestStatus) -> Quest {
        Quest {
            id: "q1".into(),
            hunter_id: "h1".into(),
            quest_type: QuestType::Daily,
            category: QuestCategory::Mind,
            title: "Meditate for 10 minutes".into(),
            description: None,
            xp_reward: 150,
            difficulty: 1,
            status,
            due_date: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_complete_only_from_active() {
        let now = Utc::now();
        let mut quest = sample_quest(QuestStatus::Active);
        assert!(quest.complete(now));
        assert_eq!(quest.status, QuestStatus::Completed);
        assert_eq!(quest.completed_at, Some(now));

        assert!(!quest.complete(now), "Completed quest must not complete twice");
    }

    #[test]
    fn test_expired_never_resurrects() {
        let mut quest = sample_quest(QuestStatus::Expired);
        assert!(!quest.complete(Utc::now()));
        assert_eq!(quest.status, QuestStatus::Expired);
        assert!(quest.completed_at.is_none());
    }

    #[test]
    fn test_counts_from_quests() {
        let mut boss = sample_quest(QuestStatus::Completed);
        boss.quest_type = QuestType::Boss;
        boss.category = QuestCategory::Business;
        let quests = vec![
            sample_quest(QuestStatus::Completed),
            sample_quest(QuestStatus::Active),
            boss,
        ];
        let counts = QuestCounts::from_quests(&quests);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.of_type(QuestType::Daily), 1);
        assert_eq!(counts.of_type(QuestType::Boss), 1);
        assert_eq!(counts.in_category(QuestCategory::Mind), 1);
        assert_eq!(counts.in_category(QuestCategory::Business), 1);
        assert_eq!(counts.in_category(QuestCategory::Skill), 0);
    }

    #[test]
    fn test_generated_into_quest_is_active() {
        let generated = GeneratedQuest {
            title: "Run 5 kilometers".into(),
            description: "Build endurance".into(),
            category: QuestCategory::Physical,
            quest_type: QuestType::Daily,
            xp_reward: 275,
            difficulty: 1,
            due_date: Utc::now(),
        };
        let quest = generated.into_quest("q9", "h1", Utc::now());
        assert!(quest.is_active());
        assert_eq!(quest.description.as_deref(), Some("Build endurance"));
    }
}
