//! Hunter System - Progression Core Library
//!
//! Deterministic progression logic for the Hunter System:
//! - XP curve, level resolution and rank ladder
//! - Quest reward calculation (level, streak, penalty, quest type, combo)
//! - Quest generation from template pools with an injectable RNG
//! - Title catalog and unlock checks
//! - Upgrade presentation prioritization
//! - System controller over an async hunter repository
//! - Monte-Carlo pacing simulation

pub mod artwork;
pub mod ascension;
pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod hunter;
pub mod logging;
pub mod progression;
pub mod quest;
pub mod questgen;
pub mod repository;
pub mod system;
pub mod titles;
pub mod upgrade;

pub use error::{ConfigError, SystemError, SystemResult};
pub use hunter::{Hunter, HunterClass, HunterGoals, HunterStats, StatKind};
pub use progression::{rank_for_level, resolve_level, xp_required_for_level, Rank};
pub use quest::{Quest, QuestCategory, QuestStatus, QuestType};
pub use system::{QuestCompletionResult, QuestUnlocks, SystemController};
