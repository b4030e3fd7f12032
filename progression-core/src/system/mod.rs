//! System controller
//!
//! Orchestrates one user action at a time over a `HunterRepository`:
//! quest completion (reward, level, rank, stats, titles, presentation),
//! periodic quest refresh and raid unlocks. All arithmetic lives in the pure modules; this
//! layer only reads state, calls them, and writes one batch back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::artwork::{ascension_artwork, rank_artwork, title_image, AscensionArtwork, RankArtwork};
use crate::ascension::AscensionLogEntry;
use crate::config::SystemConfig;
use crate::error::{SystemError, SystemResult};
use crate::hunter::{class_stat_gain, StatGain};
use crate::logging::TimingSpan;
use crate::progression::{
    calculate_quest_xp, check_rank_up, combo_bonus, level_change, Rank, RewardInput, XpCalculation,
};
use crate::quest::{Quest, QuestStatus, QuestType};
use crate::questgen::rng::{quest_seed, seeded_rng};
use crate::questgen::{
    generate_daily_quests, generate_raid_quest, generate_weekly_boss, should_unlock_boss_quest,
    should_unlock_raid_quest,
};
use crate::repository::{HunterRepository, QuestCompletionWrite};
use crate::titles::{check_title_unlocks, equip_title, grant_titles, TitleProgress, TitleRarity};
use crate::upgrade::{
    completion_message, decide_upgrade_presentation, level_up_event, rank_up_event,
    title_unlock_event, UpgradeDecision, UpgradeEvent,
};

#[derive(Debug, Clone, Serialize)]
pub struct LevelUpOutcome {
    pub old_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
    pub artwork: AscensionArtwork,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankUpOutcome {
    pub old_rank: Rank,
    pub new_rank: Rank,
    pub artwork: RankArtwork,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnlockedTitle {
    pub id: String,
    pub name: String,
    pub rarity: TitleRarity,
    pub image_path: String,
}

/// Everything the completion screen needs
#[derive(Debug, Clone, Serialize)]
pub struct QuestCompletionResult {
    /// Quest reward plus combo bonus
    pub xp_gained: u64,
    pub total_xp: u64,
    pub reward: XpCalculation,
    pub combo_bonus: u64,
    pub level_up: Option<LevelUpOutcome>,
    pub rank_up: Option<RankUpOutcome>,
    pub stat_gain: Option<StatGain>,
    pub titles_unlocked: Vec<UnlockedTitle>,
    pub presentation: UpgradeDecision,
    pub message: String,
}

/// Which special quest types a hunter has earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestUnlocks {
    pub boss: bool,
    pub raid: bool,
}

/// Tries before a completion that keeps racing other writes gives up
const MAX_COMPLETION_ATTEMPTS: u32 = 4;

pub struct SystemController {
    repo: Arc<dyn HunterRepository>,
    config: SystemConfig,
    quest_seq: AtomicU64,
}

impl SystemController {
    pub fn new(repo: Arc<dyn HunterRepository>, config: SystemConfig) -> Self {
        Self {
            repo,
            config,
            quest_seq: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Complete an active quest and credit its rewards exactly once.
    ///
    /// The reward is computed from a hunter snapshot; if another completion
    /// changes the hunter before the write lands, the whole computation is
    /// redone against the fresh row.
    pub async fn complete_quest(
        &self,
        quest_id: &str,
        hunter_id: &str,
        now: DateTime<Utc>,
    ) -> SystemResult<QuestCompletionResult> {
        let _timing = TimingSpan::new("complete_quest", hunter_id);
        for attempt in 1..=MAX_COMPLETION_ATTEMPTS {
            if let Some(result) = self.try_complete_quest(quest_id, hunter_id, now).await? {
                return Ok(result);
            }
            tracing::debug!(
                quest_id,
                hunter_id,
                attempt,
                "hunter changed mid-completion, retrying"
            );
        }
        tracing::warn!(quest_id, hunter_id, "completion kept losing to concurrent writes");
        Err(SystemError::ConcurrentUpdate {
            hunter_id: hunter_id.to_string(),
        })
    }

    /// One completion attempt. `Ok(None)` means the hunter row moved under us.
    async fn try_complete_quest(
        &self,
        quest_id: &str,
        hunter_id: &str,
        now: DateTime<Utc>,
    ) -> SystemResult<Option<QuestCompletionResult>> {
        let quest = self
            .repo
            .get_quest(quest_id)
            .await?
            .ok_or_else(|| SystemError::QuestNotFound(quest_id.to_string()))?;
        if !quest.is_active() {
            return Err(SystemError::QuestNotActive {
                id: quest.id,
                status: quest.status,
            });
        }
        if quest.hunter_id != hunter_id {
            return Err(SystemError::QuestOwnerMismatch {
                quest_id: quest.id,
                hunter_id: hunter_id.to_string(),
            });
        }

        let hunter = self
            .repo
            .get_hunter(hunter_id)
            .await?
            .ok_or_else(|| SystemError::HunterNotFound(hunter_id.to_string()))?;

        let reward = calculate_quest_xp(RewardInput {
            base_xp: quest.xp_reward,
            level: hunter.level,
            streak: hunter.current_streak,
            penalty_mode: hunter.penalty_mode,
            quest_type: quest.quest_type,
        });

        // Read before the write below. A completion that lands in between
        // moves `total_xp`, so the write is refused and this count re-read;
        // only zero-XP completions can still slip past unseen.
        let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let completed_today = self
            .repo
            .count_completed_since(hunter_id, start_of_day)
            .await?
            .saturating_add(1);
        let combo = combo_bonus(completed_today);

        let xp_gained = reward.total_xp.saturating_add(combo);
        let new_total = hunter.total_xp.saturating_add(xp_gained);
        let level = level_change(hunter.total_xp, new_total);
        let rank = check_rank_up(level.old_level, level.new_level);

        let mut updated = hunter.clone();
        updated.total_xp = new_total;
        updated.level = level.new_level;
        updated.current_xp = level.remaining_xp;
        updated.rank = rank.new_rank;
        updated.last_active = Some(now);

        let stat_gain = if level.ascension_triggered {
            class_stat_gain(hunter.hunter_class, level.new_level)
        } else {
            None
        };

        let mut stats = self.repo.get_stats(hunter_id).await?;
        if let Some(gain) = stat_gain {
            stats.add(gain.stat, gain.amount);
        }
        let mut counts = self.repo.get_quest_counts(hunter_id).await?;
        counts.record(quest.quest_type, quest.category);

        let owned = self.repo.get_hunter_titles(hunter_id).await?;
        let already: std::collections::HashSet<String> =
            owned.iter().map(|t| t.title_id.clone()).collect();
        let catalog = self.repo.get_title_catalog().await?;
        let progress = TitleProgress::from_hunter(&updated, stats, counts);
        let unlocks = check_title_unlocks(&catalog, &already, &progress, now);

        let level_event = level
            .ascension_triggered
            .then(|| level_up_event(level.new_level, level.levels_gained));
        let rank_event = rank
            .ranked_up
            .then(|| rank_up_event(rank.old_rank, rank.new_rank));
        let title_events: Vec<UpgradeEvent> = unlocks
            .iter()
            .enumerate()
            .map(|(i, u)| {
                title_unlock_event(u.title.rarity, &u.title.category, owned.len() + i + 1)
            })
            .collect();
        let presentation =
            decide_upgrade_presentation(level_event.as_ref(), rank_event.as_ref(), &title_events);

        let mut log_entries = Vec::new();
        let level_up = level.ascension_triggered.then(|| {
            let artwork = ascension_artwork(level.new_level);
            if presentation.show_level_up {
                log_entries.push(AscensionLogEntry::level(
                    hunter_id,
                    level.old_level,
                    level.new_level,
                    &artwork,
                    now,
                ));
            }
            LevelUpOutcome {
                old_level: level.old_level,
                new_level: level.new_level,
                levels_gained: level.levels_gained,
                artwork,
            }
        });
        let rank_up = rank.ranked_up.then(|| {
            let artwork = rank_artwork(rank.new_rank);
            if presentation.show_rank_up {
                log_entries.push(AscensionLogEntry::rank(hunter_id, rank.old_rank, &artwork, now));
            }
            RankUpOutcome {
                old_rank: rank.old_rank,
                new_rank: rank.new_rank,
                artwork,
            }
        });

        let titles_unlocked: Vec<UnlockedTitle> = unlocks
            .iter()
            .map(|u| UnlockedTitle {
                id: u.title.id.clone(),
                name: u.title.name.clone(),
                rarity: u.title.rarity,
                image_path: title_image(&u.title),
            })
            .collect();
        // every unlock is logged, shown or not
        for title in &titles_unlocked {
            log_entries.push(AscensionLogEntry::title(
                hunter_id,
                &title.name,
                title.image_path.clone(),
                now,
            ));
        }

        let mut message_rng = seeded_rng(quest_seed(quest_id, now.date_naive()));
        let message = completion_message(presentation.priority, &mut message_rng).to_string();

        let applied = self
            .repo
            .apply_quest_completion(QuestCompletionWrite {
                quest_id: quest_id.to_string(),
                completed_at: now,
                expected_total_xp: hunter.total_xp,
                hunter: updated,
                stat_gain,
                unlocked_titles: grant_titles(hunter_id, &unlocks),
                log_entries,
            })
            .await?;
        if !applied {
            let status = self.repo.get_quest(quest_id).await?.map(|q| q.status);
            if status == Some(QuestStatus::Active) {
                return Ok(None);
            }
            // lost the race with another completion of the same quest
            let status = status.unwrap_or(QuestStatus::Completed);
            tracing::warn!(quest_id, hunter_id, ?status, "quest completion rejected by repository");
            return Err(SystemError::QuestNotActive {
                id: quest_id.to_string(),
                status,
            });
        }

        tracing::info!(
            quest_id,
            hunter_id,
            xp_gained,
            combo,
            new_level = level.new_level,
            rank = %rank.new_rank,
            titles = titles_unlocked.len(),
            "quest completed"
        );
        if rank.ranked_up {
            tracing::info!(hunter_id, from = %rank.old_rank, to = %rank.new_rank, "rank up");
        }
        for title in &titles_unlocked {
            tracing::info!(
                hunter_id,
                title_id = %title.id,
                rarity = %title.rarity,
                "title unlocked"
            );
        }

        Ok(Some(QuestCompletionResult {
            xp_gained,
            total_xp: new_total,
            reward,
            combo_bonus: combo,
            level_up,
            rank_up,
            stat_gain,
            titles_unlocked,
            presentation,
            message,
        }))
    }

    /// Generate the daily batch, plus a weekly boss when none is active and
    /// the hunter is high enough. Returns the inserted quests.
    pub async fn generate_quests_for_hunter<R: Rng + Send + ?Sized>(
        &self,
        hunter_id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> SystemResult<Vec<Quest>> {
        let _timing = TimingSpan::new("generate_quests", hunter_id);
        let hunter = self
            .repo
            .get_hunter(hunter_id)
            .await?
            .ok_or_else(|| SystemError::HunterNotFound(hunter_id.to_string()))?;
        let goals = self
            .repo
            .get_goals(hunter_id)
            .await?
            .ok_or_else(|| SystemError::GoalsNotFound(hunter_id.to_string()))?;

        let mut generated = generate_daily_quests(
            &goals,
            hunter.level,
            hunter.current_streak,
            self.config.daily_quest_count,
            now,
            rng,
        );

        let add_boss = hunter.level >= self.config.boss_min_level
            && !self.repo.has_active_boss(hunter_id).await?;
        if add_boss {
            generated.push(generate_weekly_boss(
                &goals,
                hunter.level,
                hunter.current_streak,
                now,
                rng,
            ));
        }

        let quests: Vec<Quest> = generated
            .into_iter()
            .map(|g| {
                let seq = self.quest_seq.fetch_add(1, Ordering::Relaxed);
                let id = format!("{hunter_id}-{}-{seq}", now.timestamp_millis());
                g.into_quest(id, hunter_id, now)
            })
            .collect();

        self.repo.insert_quests(quests.clone()).await?;
        tracing::info!(
            hunter_id,
            count = quests.len(),
            with_boss = add_boss,
            "quest batch generated"
        );
        Ok(quests)
    }

    /// Refresh with the hunter's stable per-day seed
    pub async fn refresh_quests(
        &self,
        hunter_id: &str,
        now: DateTime<Utc>,
    ) -> SystemResult<Vec<Quest>> {
        let mut rng = seeded_rng(quest_seed(hunter_id, now.date_naive()));
        self.generate_quests_for_hunter(hunter_id, now, &mut rng).await
    }

    /// Boss and raid availability from level and completed-quest history
    pub async fn quest_unlocks(&self, hunter_id: &str) -> SystemResult<QuestUnlocks> {
        let hunter = self
            .repo
            .get_hunter(hunter_id)
            .await?
            .ok_or_else(|| SystemError::HunterNotFound(hunter_id.to_string()))?;
        let counts = self.repo.get_quest_counts(hunter_id).await?;
        Ok(QuestUnlocks {
            boss: should_unlock_boss_quest(hunter.level, counts.daily, self.config.boss_min_level),
            raid: should_unlock_raid_quest(hunter.level, counts.boss, self.config.raid_min_level),
        })
    }

    /// Add a month-long raid once raids are unlocked. Returns `None` while
    /// they are locked or another raid is still active.
    pub async fn generate_raid_for_hunter<R: Rng + Send + ?Sized>(
        &self,
        hunter_id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> SystemResult<Option<Quest>> {
        let _timing = TimingSpan::new("generate_raid", hunter_id);
        if !self.quest_unlocks(hunter_id).await?.raid {
            tracing::debug!(hunter_id, "raid still locked");
            return Ok(None);
        }
        if self.repo.has_active_quest(hunter_id, QuestType::Raid).await? {
            return Ok(None);
        }
        let hunter = self
            .repo
            .get_hunter(hunter_id)
            .await?
            .ok_or_else(|| SystemError::HunterNotFound(hunter_id.to_string()))?;

        let seq = self.quest_seq.fetch_add(1, Ordering::Relaxed);
        let id = format!("{hunter_id}-{}-{seq}", now.timestamp_millis());
        let quest = generate_raid_quest(hunter.level, now, rng).into_quest(id, hunter_id, now);

        self.repo.insert_quests(vec![quest.clone()]).await?;
        tracing::info!(hunter_id, quest_id = %quest.id, "raid generated");
        Ok(Some(quest))
    }

    /// Wear one owned title; every other owned title is taken off.
    pub async fn equip_title(&self, hunter_id: &str, title_id: &str) -> SystemResult<()> {
        if self.repo.get_hunter(hunter_id).await?.is_none() {
            return Err(SystemError::HunterNotFound(hunter_id.to_string()));
        }
        let mut owned = self.repo.get_hunter_titles(hunter_id).await?;
        if !equip_title(&mut owned, title_id) {
            return Err(SystemError::TitleNotOwned {
                hunter_id: hunter_id.to_string(),
                title_id: title_id.to_string(),
            });
        }
        self.repo.save_hunter_titles(hunter_id, owned).await?;
        tracing::debug!(hunter_id, title_id, "title equipped");
        Ok(())
    }
}
