//! Adaptive quest difficulty and quest-type unlock gates.

use crate::constants::{
    BOSS_UNLOCK_DAILIES_REQUIRED, DIFFICULTY_GROWTH, DIFFICULTY_LEVEL_STEP, DIFFICULTY_MAX_MULT,
    DIFFICULTY_MIN_MULT, DIFFICULTY_STREAK_CAP, DIFFICULTY_STREAK_PER_DAY,
    RAID_UNLOCK_BOSSES_REQUIRED,
};

/// 1.15^(level/5), continuous in level
pub fn level_growth(level: u32) -> f64 {
    DIFFICULTY_GROWTH.powf(level as f64 / DIFFICULTY_LEVEL_STEP)
}

/// floor(base * 1.15^(level/5))
pub fn scale_quest_difficulty(base_value: u32, level: u32) -> u64 {
    (base_value as f64 * level_growth(level)).floor() as u64
}

/// Level growth combined with streak scaling, clamped to [1.0, 10.0]
pub fn difficulty_multiplier(level: u32, streak: u32) -> f64 {
    let streak_mult = 1.0 + streak.min(DIFFICULTY_STREAK_CAP) as f64 * DIFFICULTY_STREAK_PER_DAY;
    (level_growth(level) * streak_mult).clamp(DIFFICULTY_MIN_MULT, DIFFICULTY_MAX_MULT)
}

/// floor(base * multiplier)
pub fn scaled_value(base_value: u32, multiplier: f64) -> u64 {
    (base_value as f64 * multiplier).floor() as u64
}

/// Bosses open at `min_level` once enough dailies are done
pub fn should_unlock_boss_quest(level: u32, completed_dailies: u32, min_level: u32) -> bool {
    level >= min_level && completed_dailies >= BOSS_UNLOCK_DAILIES_REQUIRED
}

/// Raids open at `min_level` once enough bosses are beaten
pub fn should_unlock_raid_quest(level: u32, completed_bosses: u32, min_level: u32) -> bool {
    level >= min_level && completed_bosses >= RAID_UNLOCK_BOSSES_REQUIRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_quest_difficulty() {
        assert_eq!(scale_quest_difficulty(10, 0), 10);
        // 1.15^1 = 1.15
        assert_eq!(scale_quest_difficulty(100, 5), 114);
        // 1.15^2 = 1.3225
        assert_eq!(scale_quest_difficulty(100, 10), 132);
    }

    #[test]
    fn test_difficulty_multiplier_clamped() {
        assert_eq!(difficulty_multiplier(0, 0), 1.0);
        assert!((difficulty_multiplier(0, 10) - 1.2).abs() < 1e-9);
        assert_eq!(difficulty_multiplier(500, 30), 10.0);
    }

    #[test]
    fn test_streak_contribution_caps_at_thirty() {
        assert_eq!(difficulty_multiplier(10, 30), difficulty_multiplier(10, 300));
    }

    #[test]
    fn test_difficulty_multiplier_monotonic_in_level() {
        let mut prev = difficulty_multiplier(1, 5);
        for level in 2..300 {
            let cur = difficulty_multiplier(level, 5);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_unlock_gates() {
        use crate::constants::{BOSS_UNLOCK_MIN_LEVEL as BOSS, RAID_UNLOCK_MIN_LEVEL as RAID};

        assert!(!should_unlock_boss_quest(4, 100, BOSS));
        assert!(!should_unlock_boss_quest(5, 9, BOSS));
        assert!(should_unlock_boss_quest(5, 10, BOSS));
        assert!(!should_unlock_raid_quest(24, 10, RAID));
        assert!(!should_unlock_raid_quest(25, 2, RAID));
        assert!(should_unlock_raid_quest(25, 3, RAID));
    }

    #[test]
    fn test_unlock_gates_follow_min_level() {
        assert!(should_unlock_raid_quest(10, 3, 10));
        assert!(!should_unlock_raid_quest(30, 3, 40));
        assert!(should_unlock_boss_quest(1, 10, 1));
    }
}
