//! Centralized progression constants for the hunter core.
//!
//! Tuning numbers shared by the level, reward and quest modules live here.
//! Lookup tables (rank thresholds, template pools, the title catalog) remain
//! in their respective modules as the single source of truth.

// =====================================================
// XP Curve
// =====================================================

/// XP required for level n: floor(XP_CURVE_BASE * n^XP_CURVE_EXPONENT)
pub const XP_CURVE_BASE: f64 = 100.0;

/// Exponent of the XP curve
pub const XP_CURVE_EXPONENT: f64 = 1.5;

/// Levels that get ascension artwork and epic presentation
pub const MILESTONE_LEVELS: [u32; 11] = [1, 5, 10, 20, 30, 40, 50, 75, 100, 150, 200];

// =====================================================
// Quest Rewards
// =====================================================

/// Per-level XP bonus for daily rewards: 1.0 + level * LEVEL_BONUS_PER_LEVEL
pub const LEVEL_BONUS_PER_LEVEL: f64 = 0.1;

/// Per-level XP bonus for boss quest templates (steeper than dailies)
pub const BOSS_LEVEL_BONUS_PER_LEVEL: f64 = 0.15;

/// Streak multiplier forced while penalty mode is active
pub const PENALTY_MODE_MULT: f64 = 0.5;

/// Quest type multipliers
pub const BOSS_QUEST_MULT: f64 = 1.5;
pub const RAID_QUEST_MULT: f64 = 2.0;

/// Same-day combo thresholds (inclusive of the completing quest) and flat bonuses
pub const COMBO_SMALL_THRESHOLD: u32 = 3;
pub const COMBO_SMALL_BONUS: u64 = 200;
pub const COMBO_LARGE_THRESHOLD: u32 = 5;
pub const COMBO_LARGE_BONUS: u64 = 500;

/// Perfect day bonuses
pub const PERFECT_DAY_DAILY_BONUS: u64 = 1000;
pub const PERFECT_DAY_BOSS_BONUS: u64 = 2000;

/// Class stat gain on level-up: floor(new_level / CLASS_STAT_LEVEL_DIVISOR)
pub const CLASS_STAT_LEVEL_DIVISOR: u32 = 5;

// =====================================================
// Quest Difficulty
// =====================================================

/// Template values grow by DIFFICULTY_GROWTH every DIFFICULTY_LEVEL_STEP levels
pub const DIFFICULTY_GROWTH: f64 = 1.15;
pub const DIFFICULTY_LEVEL_STEP: f64 = 5.0;

/// Streak contribution to difficulty: 1.0 + min(streak, cap) * per_day
pub const DIFFICULTY_STREAK_CAP: u32 = 30;
pub const DIFFICULTY_STREAK_PER_DAY: f64 = 0.02;

/// Clamp range for the combined difficulty multiplier
pub const DIFFICULTY_MIN_MULT: f64 = 1.0;
pub const DIFFICULTY_MAX_MULT: f64 = 10.0;

// =====================================================
// Quest Unlock Gates
// =====================================================

pub const BOSS_UNLOCK_MIN_LEVEL: u32 = 5;
pub const BOSS_UNLOCK_DAILIES_REQUIRED: u32 = 10;
pub const RAID_UNLOCK_MIN_LEVEL: u32 = 25;
pub const RAID_UNLOCK_BOSSES_REQUIRED: u32 = 3;

/// Days until a boss / raid quest is due
pub const BOSS_DUE_DAYS: i64 = 7;
pub const RAID_DUE_DAYS: i64 = 30;

/// Default number of dailies generated per refresh
pub const DEFAULT_DAILY_QUEST_COUNT: usize = 5;
