//! In-memory hunter store
//!
//! Backs the tests and the simulator. One mutex guards all tables so a
//! completion batch is applied atomically.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{HunterRepository, QuestCompletionWrite, RepoResult};
use crate::ascension::AscensionLogEntry;
use crate::hunter::{Hunter, HunterGoals, HunterStats};
use crate::quest::{Quest, QuestCounts, QuestStatus, QuestType};
use crate::titles::{default_catalog, HunterTitle, Title};

#[derive(Default)]
struct Tables {
    hunters: HashMap<String, Hunter>,
    goals: HashMap<String, HunterGoals>,
    stats: HashMap<String, HunterStats>,
    /// Insertion order is kept for listing
    quests: Vec<Quest>,
    hunter_titles: HashMap<String, Vec<HunterTitle>>,
    catalog: Vec<Title>,
    ascension_log: Vec<AscensionLogEntry>,
}

pub struct InMemoryHunterRepository {
    tables: Mutex<Tables>,
}

impl Default for InMemoryHunterRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHunterRepository {
    /// Empty store seeded with the built-in title catalog
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    pub fn with_catalog(catalog: Vec<Title>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                catalog,
                ..Default::default()
            }),
        }
    }

    pub fn insert_hunter(&self, hunter: Hunter) {
        let mut t = self.tables.lock();
        t.stats.entry(hunter.id.clone()).or_default();
        t.hunters.insert(hunter.id.clone(), hunter);
    }

    pub fn set_goals(&self, hunter_id: &str, goals: HunterGoals) {
        self.tables.lock().goals.insert(hunter_id.to_string(), goals);
    }

    pub fn set_stats(&self, hunter_id: &str, stats: HunterStats) {
        self.tables.lock().stats.insert(hunter_id.to_string(), stats);
    }

    pub fn insert_quest(&self, quest: Quest) {
        self.tables.lock().quests.push(quest);
    }

    pub fn hunter(&self, hunter_id: &str) -> Option<Hunter> {
        self.tables.lock().hunters.get(hunter_id).cloned()
    }

    pub fn quests_for(&self, hunter_id: &str) -> Vec<Quest> {
        self.tables
            .lock()
            .quests
            .iter()
            .filter(|q| q.hunter_id == hunter_id)
            .cloned()
            .collect()
    }

    pub fn ascension_log(&self, hunter_id: &str) -> Vec<AscensionLogEntry> {
        self.tables
            .lock()
            .ascension_log
            .iter()
            .filter(|e| e.hunter_id == hunter_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HunterRepository for InMemoryHunterRepository {
    async fn get_hunter(&self, hunter_id: &str) -> RepoResult<Option<Hunter>> {
        Ok(self.hunter(hunter_id))
    }

    async fn get_quest(&self, quest_id: &str) -> RepoResult<Option<Quest>> {
        Ok(self.tables.lock().quests.iter().find(|q| q.id == quest_id).cloned())
    }

    async fn get_goals(&self, hunter_id: &str) -> RepoResult<Option<HunterGoals>> {
        Ok(self.tables.lock().goals.get(hunter_id).cloned())
    }

    async fn get_stats(&self, hunter_id: &str) -> RepoResult<HunterStats> {
        Ok(self.tables.lock().stats.get(hunter_id).copied().unwrap_or_default())
    }

    async fn get_hunter_titles(&self, hunter_id: &str) -> RepoResult<Vec<HunterTitle>> {
        Ok(self
            .tables
            .lock()
            .hunter_titles
            .get(hunter_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_title_catalog(&self) -> RepoResult<Vec<Title>> {
        Ok(self.tables.lock().catalog.clone())
    }

    async fn get_quest_counts(&self, hunter_id: &str) -> RepoResult<QuestCounts> {
        let t = self.tables.lock();
        Ok(QuestCounts::from_quests(
            t.quests.iter().filter(|q| q.hunter_id == hunter_id),
        ))
    }

    async fn count_completed_since(
        &self,
        hunter_id: &str,
        since: DateTime<Utc>,
    ) -> RepoResult<u32> {
        let t = self.tables.lock();
        let n = t
            .quests
            .iter()
            .filter(|q| q.hunter_id == hunter_id && q.status == QuestStatus::Completed)
            .filter(|q| q.completed_at.is_some_and(|at| at >= since))
            .count();
        Ok(u32::try_from(n).unwrap_or(u32::MAX))
    }

    async fn has_active_quest(&self, hunter_id: &str, quest_type: QuestType) -> RepoResult<bool> {
        Ok(self
            .tables
            .lock()
            .quests
            .iter()
            .any(|q| q.hunter_id == hunter_id && q.quest_type == quest_type && q.is_active()))
    }

    async fn apply_quest_completion(&self, write: QuestCompletionWrite) -> RepoResult<bool> {
        let mut t = self.tables.lock();
        let hunter_id = write.hunter.id.clone();

        let Some(stored) = t.hunters.get(&hunter_id) else {
            return Err(format!("unknown hunter {hunter_id}").into());
        };
        if stored.total_xp != write.expected_total_xp {
            return Ok(false);
        }
        let Some(quest) = t.quests.iter_mut().find(|q| q.id == write.quest_id) else {
            return Ok(false);
        };
        if !quest.complete(write.completed_at) {
            return Ok(false);
        }

        t.hunters.insert(hunter_id.clone(), write.hunter);
        if let Some(gain) = write.stat_gain {
            t.stats.entry(hunter_id.clone()).or_default().add(gain.stat, gain.amount);
        }

        let owned = t.hunter_titles.entry(hunter_id).or_default();
        let have: HashSet<String> = owned.iter().map(|h| h.title_id.clone()).collect();
        owned.extend(
            write
                .unlocked_titles
                .into_iter()
                .filter(|h| !have.contains(&h.title_id)),
        );

        t.ascension_log.extend(write.log_entries);
        Ok(true)
    }

    async fn insert_quests(&self, quests: Vec<Quest>) -> RepoResult<()> {
        self.tables.lock().quests.extend(quests);
        Ok(())
    }

    async fn save_hunter_titles(
        &self,
        hunter_id: &str,
        titles: Vec<HunterTitle>,
    ) -> RepoResult<()> {
        self.tables.lock().hunter_titles.insert(hunter_id.to_string(), titles);
        Ok(())
    }
}
