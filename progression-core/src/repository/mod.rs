//! Repository traits - abstraction layer for hunter data access
//!
//! The progression engine never touches storage directly; the system
//! controller reads and writes through `HunterRepository` so backends can be
//! swapped (in-memory for tests, a database service in production).

use std::collections::HashSet;
use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ascension::AscensionLogEntry;
use crate::hunter::{Hunter, HunterGoals, HunterStats, StatGain};
use crate::quest::{Quest, QuestCounts, QuestType};
use crate::titles::{HunterTitle, Title};

pub mod memory;

pub use memory::InMemoryHunterRepository;

/// Generic result type for repository operations
pub type RepoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Everything one quest completion persists, applied all-or-nothing
#[derive(Debug, Clone)]
pub struct QuestCompletionWrite {
    pub quest_id: String,
    pub completed_at: DateTime<Utc>,
    /// `total_xp` the hunter had when the reward was computed. A stored
    /// value that differs means another completion landed in between.
    pub expected_total_xp: u64,
    /// Hunter row with new XP, level, rank and `last_active`
    pub hunter: Hunter,
    pub stat_gain: Option<StatGain>,
    pub unlocked_titles: Vec<HunterTitle>,
    pub log_entries: Vec<AscensionLogEntry>,
}

// ============================================================================
// Hunter Repository
// ============================================================================

#[async_trait]
pub trait HunterRepository: Send + Sync {
    async fn get_hunter(&self, hunter_id: &str) -> RepoResult<Option<Hunter>>;
    async fn get_quest(&self, quest_id: &str) -> RepoResult<Option<Quest>>;
    async fn get_goals(&self, hunter_id: &str) -> RepoResult<Option<HunterGoals>>;
    async fn get_stats(&self, hunter_id: &str) -> RepoResult<HunterStats>;
    async fn get_hunter_titles(&self, hunter_id: &str) -> RepoResult<Vec<HunterTitle>>;
    async fn get_title_catalog(&self) -> RepoResult<Vec<Title>>;
    async fn get_quest_counts(&self, hunter_id: &str) -> RepoResult<QuestCounts>;

    /// Completed quests with `completed_at >= since`
    async fn count_completed_since(&self, hunter_id: &str, since: DateTime<Utc>) -> RepoResult<u32>;

    async fn has_active_quest(&self, hunter_id: &str, quest_type: QuestType) -> RepoResult<bool>;

    async fn has_active_boss(&self, hunter_id: &str) -> RepoResult<bool> {
        self.has_active_quest(hunter_id, QuestType::Boss).await
    }

    /// Apply a completion atomically.
    ///
    /// Must only transition a quest that is still Active, and only while the
    /// hunter's stored `total_xp` equals `expected_total_xp`. Returns `false`
    /// and writes nothing otherwise, so each completion is credited once and
    /// no completion overwrites another's XP.
    async fn apply_quest_completion(&self, write: QuestCompletionWrite) -> RepoResult<bool>;

    async fn insert_quests(&self, quests: Vec<Quest>) -> RepoResult<()>;

    /// Replace the hunter's owned-title rows
    async fn save_hunter_titles(&self, hunter_id: &str, titles: Vec<HunterTitle>) -> RepoResult<()>;

    async fn unlocked_title_ids(&self, hunter_id: &str) -> RepoResult<HashSet<String>> {
        Ok(self
            .get_hunter_titles(hunter_id)
            .await?
            .into_iter()
            .map(|t| t.title_id)
            .collect())
    }
}
