//! Hunter ranks (E → SSS)
//!
//! Rank is a pure step function of level and is never stored as transition
//! state. Levels keep growing past 200; rank stops at SSS.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl Rank {
    pub fn all() -> [Rank; 8] {
        [
            Self::E,
            Self::D,
            Self::C,
            Self::B,
            Self::A,
            Self::S,
            Self::SS,
            Self::SSS,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
            Self::SS => "SS",
            Self::SSS => "SSS",
        }
    }

    /// Exact rank code; anything else is `None`
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.as_str() == code)
    }

    /// Lowest level that holds this rank
    pub fn min_level(&self) -> u32 {
        match self {
            Self::E => 1,
            Self::D => 10,
            Self::C => 25,
            Self::B => 50,
            Self::A => 75,
            Self::S => 100,
            Self::SS => 150,
            Self::SSS => 200,
        }
    }

    pub fn next_rank(&self) -> Option<Self> {
        match self {
            Self::E => Some(Self::D),
            Self::D => Some(Self::C),
            Self::C => Some(Self::B),
            Self::B => Some(Self::A),
            Self::A => Some(Self::S),
            Self::S => Some(Self::SS),
            Self::SS => Some(Self::SSS),
            Self::SSS => None,
        }
    }

    pub fn info(&self) -> RankInfo {
        let (color, description, title) = match self {
            Self::E => (
                "#6b7280",
                "The weakest hunters. But every monarch began here.",
                "Novice Hunter",
            ),
            Self::D => (
                "#84cc16",
                "Basic competence achieved. The path becomes visible.",
                "Awakened Hunter",
            ),
            Self::C => (
                "#3b82f6",
                "Above average. Power begins to manifest.",
                "Skilled Hunter",
            ),
            Self::B => ("#a855f7", "Formidable. The weak fear you.", "Elite Hunter"),
            Self::A => (
                "#f59e0b",
                "Elite among hunters. National level power.",
                "Master Hunter",
            ),
            Self::S => (
                "#ef4444",
                "Legendary. Your name echoes in the void.",
                "Monarch Candidate",
            ),
            Self::SS => (
                "#ec4899",
                "Mythical. Reality bends to your will.",
                "Shadow General",
            ),
            Self::SSS => (
                "#fbbf24",
                "Shadow Monarch. You command the darkness itself.",
                "Shadow Monarch",
            ),
        };
        RankInfo {
            rank: *self,
            min_level: self.min_level(),
            color,
            description,
            title,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static display data for a rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankInfo {
    pub rank: Rank,
    pub min_level: u32,
    pub color: &'static str,
    pub description: &'static str,
    pub title: &'static str,
}

pub fn rank_for_level(level: u32) -> Rank {
    match level {
        200.. => Rank::SSS,
        150..=199 => Rank::SS,
        100..=149 => Rank::S,
        75..=99 => Rank::A,
        50..=74 => Rank::B,
        25..=49 => Rank::C,
        10..=24 => Rank::D,
        _ => Rank::E,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub ranked_up: bool,
    pub old_rank: Rank,
    pub new_rank: Rank,
}

pub fn check_rank_up(old_level: u32, new_level: u32) -> RankChange {
    let old_rank = rank_for_level(old_level);
    let new_rank = rank_for_level(new_level);
    RankChange {
        ranked_up: old_rank != new_rank,
        old_rank,
        new_rank,
    }
}
