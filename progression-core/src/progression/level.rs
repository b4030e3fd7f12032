//! XP curve and level resolution
//!
//! Level L+1 costs `xp_required_for_level(L+1)` on top of everything spent to
//! reach L. Level 1 is free, so `cumulative_xp_through_level(1) == 0`.

use serde::{Deserialize, Serialize};

use crate::constants::{MILESTONE_LEVELS, XP_CURVE_BASE, XP_CURVE_EXPONENT};

/// floor(100 * n^1.5)
pub fn xp_required_for_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)).floor() as u64
}

/// Total XP spent to stand at the start of `level`
pub fn cumulative_xp_through_level(level: u32) -> u64 {
    (2..=level).fold(0u64, |acc, l| acc.saturating_add(xp_required_for_level(l)))
}

/// Level plus XP earned inside that level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelResolution {
    pub level: u32,
    pub current_xp: u64,
}

/// Walk the curve from level 1 while the next level is affordable.
pub fn resolve_level(total_xp: u64) -> LevelResolution {
    let mut level = 1u32;
    let mut cumulative = 0u64;

    loop {
        let Some(next) = cumulative.checked_add(xp_required_for_level(level + 1)) else {
            break;
        };
        if next > total_xp {
            break;
        }
        cumulative = next;
        level += 1;
    }

    LevelResolution {
        level,
        current_xp: total_xp - cumulative,
    }
}

/// XP still needed to leave `level`
pub fn xp_to_next_level(level: u32) -> u64 {
    xp_required_for_level(level + 1)
}

/// Fraction of the current level completed, in [0, 1)
pub fn level_progress(resolution: &LevelResolution) -> f32 {
    let needed = xp_to_next_level(resolution.level);
    if needed == 0 {
        return 0.0;
    }
    (resolution.current_xp as f64 / needed as f64).min(1.0) as f32
}

pub fn is_milestone_level(level: u32) -> bool {
    MILESTONE_LEVELS.contains(&level)
}

/// Outcome of crediting XP, as the presentation layer needs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpResult {
    pub old_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
    pub remaining_xp: u64,
    pub xp_for_next_level: u64,
    pub ascension_triggered: bool,
    pub milestone_level: bool,
}

/// Level result where the "old" level is the one held one XP point earlier.
pub fn calculate_level(total_xp: u64) -> LevelUpResult {
    level_change(total_xp.saturating_sub(1), total_xp)
}

/// Level result for moving from `old_total_xp` to `new_total_xp`.
pub fn level_change(old_total_xp: u64, new_total_xp: u64) -> LevelUpResult {
    let old_level = resolve_level(old_total_xp).level;
    let resolved = resolve_level(new_total_xp);
    let levels_gained = resolved.level.saturating_sub(old_level);

    LevelUpResult {
        old_level,
        new_level: resolved.level,
        levels_gained,
        remaining_xp: resolved.current_xp,
        xp_for_next_level: xp_to_next_level(resolved.level),
        ascension_triggered: resolved.level > old_level,
        milestone_level: is_milestone_level(resolved.level),
    }
}
