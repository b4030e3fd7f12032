//! Hunter progression: XP curve, levels, ranks and quest rewards.
//!
//! Every function here is pure. Dependency order is curve → level → rank →
//! reward; nothing reaches back up the chain.

pub mod level;
pub mod rank;
pub mod reward;

pub use level::{
    calculate_level, cumulative_xp_through_level, level_change, resolve_level,
    xp_required_for_level, LevelResolution, LevelUpResult,
};
pub use rank::{check_rank_up, rank_for_level, Rank, RankChange, RankInfo};
pub use reward::{
    calculate_quest_xp, combo_bonus, perfect_day_bonus, streak_multiplier, RewardInput,
    XpCalculation,
};
