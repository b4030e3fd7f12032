//! Hunter profile
//!
//! Transient copy of the persisted hunter row plus the side tables the
//! engine reads (stats, goals). The engine never owns these; the repository
//! hands out copies and receives updated copies back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::CLASS_STAT_LEVEL_DIVISOR;
use crate::progression::level::{cumulative_xp_through_level, resolve_level};
use crate::progression::rank::{rank_for_level, Rank};

/// Hunter class chosen at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HunterClass {
    Warrior,
    Assassin,
    Mage,
    #[serde(rename = "Shadow Monarch")]
    ShadowMonarch,
}

impl HunterClass {
    pub const ALL: [HunterClass; 4] = [
        HunterClass::Warrior,
        HunterClass::Assassin,
        HunterClass::Mage,
        HunterClass::ShadowMonarch,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Assassin => "Assassin",
            Self::Mage => "Mage",
            Self::ShadowMonarch => "Shadow Monarch",
        }
    }

    /// The stat that grows when a hunter of this class levels up
    pub fn primary_stat(&self) -> StatKind {
        match self {
            Self::Warrior => StatKind::Strength,
            Self::Assassin => StatKind::Discipline,
            Self::Mage => StatKind::Intelligence,
            Self::ShadowMonarch => StatKind::Willpower,
        }
    }
}

/// Named hunter attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Strength,
    Intelligence,
    Willpower,
    Discipline,
    Endurance,
}

impl StatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Willpower => "willpower",
            Self::Discipline => "discipline",
            Self::Endurance => "endurance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strength" => Some(Self::Strength),
            "intelligence" => Some(Self::Intelligence),
            "willpower" => Some(Self::Willpower),
            "discipline" => Some(Self::Discipline),
            "endurance" => Some(Self::Endurance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterStats {
    pub strength: u32,
    pub intelligence: u32,
    pub willpower: u32,
    pub discipline: u32,
    pub endurance: u32,
}

impl HunterStats {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Intelligence => self.intelligence,
            StatKind::Willpower => self.willpower,
            StatKind::Discipline => self.discipline,
            StatKind::Endurance => self.endurance,
        }
    }

    pub fn add(&mut self, stat: StatKind, amount: u32) {
        let slot = match stat {
            StatKind::Strength => &mut self.strength,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Willpower => &mut self.willpower,
            StatKind::Discipline => &mut self.discipline,
            StatKind::Endurance => &mut self.endurance,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// A stat increase granted by a class on level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGain {
    pub stat: StatKind,
    pub amount: u32,
}

/// Stat gain for reaching `new_level`; `None` for classless hunters or a zero gain.
pub fn class_stat_gain(class: Option<HunterClass>, new_level: u32) -> Option<StatGain> {
    let class = class?;
    let amount = new_level / CLASS_STAT_LEVEL_DIVISOR;
    if amount == 0 {
        return None;
    }
    Some(StatGain {
        stat: class.primary_stat(),
        amount,
    })
}

/// Onboarding answers used to bias quest generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterGoals {
    pub primary_goal: String,
    pub skillset: Vec<String>,
    pub daily_availability: u32,
    pub weaknesses: Vec<String>,
    pub long_term_mission: Option<String>,
}

impl HunterGoals {
    pub fn goal_mentions(&self, keywords: &[&str]) -> bool {
        contains_any(&self.primary_goal, keywords)
    }

    pub fn skills_mention(&self, keywords: &[&str]) -> bool {
        self.skillset.iter().any(|s| contains_any(s, keywords))
    }

    pub fn weaknesses_mention(&self, keywords: &[&str]) -> bool {
        self.weaknesses.iter().any(|w| contains_any(w, keywords))
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// The hunter row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hunter {
    pub id: String,
    pub username: String,
    pub level: u32,
    pub current_xp: u64,
    pub total_xp: u64,
    pub rank: Rank,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub hunter_class: Option<HunterClass>,
    pub penalty_mode: bool,
    pub last_active: Option<DateTime<Utc>>,
}

impl Hunter {
    /// Fresh level-1 E-rank hunter
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            level: 1,
            current_xp: 0,
            total_xp: 0,
            rank: Rank::E,
            current_streak: 0,
            longest_streak: 0,
            hunter_class: None,
            penalty_mode: false,
            last_active: None,
        }
    }

    pub fn with_class(mut self, class: HunterClass) -> Self {
        self.hunter_class = Some(class);
        self
    }

    pub fn with_streak(mut self, streak: u32) -> Self {
        self.current_streak = streak;
        self.longest_streak = self.longest_streak.max(streak);
        self
    }

    /// Set total XP and re-derive level, in-level XP and rank
    pub fn with_total_xp(mut self, total_xp: u64) -> Self {
        self.total_xp = total_xp;
        self.sync_progression();
        self
    }

    /// Re-derive `level`, `current_xp` and `rank` from `total_xp`
    pub fn sync_progression(&mut self) {
        let resolved = resolve_level(self.total_xp);
        self.level = resolved.level;
        self.current_xp = resolved.current_xp;
        self.rank = rank_for_level(resolved.level);
    }

    /// Whether the derived fields agree with `total_xp`
    pub fn is_consistent(&self) -> bool {
        self.rank == rank_for_level(self.level)
            && self.total_xp >= cumulative_xp_through_level(self.level)
            && self.current_xp == self.total_xp - cumulative_xp_through_level(self.level)
    }
}
