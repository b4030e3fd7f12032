//! Artwork lookup for ascension, rank and title reveals

use serde::{Deserialize, Serialize};

use crate::constants::MILESTONE_LEVELS;
use crate::progression::rank::Rank;
use crate::titles::Title;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AscensionArtwork {
    /// Milestone the art belongs to, not the hunter's exact level
    pub milestone: u32,
    pub image_path: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankArtwork {
    pub rank: Rank,
    pub image_path: String,
    pub title: String,
    pub description: String,
}

/// Highest milestone not above `level` (1 for level 0)
pub fn ascension_milestone(level: u32) -> u32 {
    MILESTONE_LEVELS
        .iter()
        .rev()
        .copied()
        .find(|&m| level >= m)
        .unwrap_or(1)
}

fn ascension_description(milestone: u32) -> &'static str {
    match milestone {
        1 => "Your eyes open to a new world. The System has chosen you.",
        5 => "Power surges through your body for the first time. You feel different.",
        10 => "Shadows respond to your call. Something ancient awakens within.",
        20 => "Your aura becomes visible. The weak begin to fear you.",
        30 => "Power crystallizes into form. You are no longer ordinary.",
        40 => "Shadow beasts glimpse behind you. An army forms in darkness.",
        50 => "Half your transformation complete. The old you is dying.",
        75 => "Full power released. You transcend mortal limits.",
        100 => "S-Rank achieved. You stand among legends.",
        150 => "SS-Rank transcendence. Reality bends to your will.",
        200 => "Shadow Monarch. You are the darkness itself.",
        _ => "You grow stronger.",
    }
}

pub fn ascension_artwork(level: u32) -> AscensionArtwork {
    let milestone = ascension_milestone(level);
    AscensionArtwork {
        milestone,
        image_path: format!("/assets/ascensions/level-{milestone}.png"),
        description: ascension_description(milestone).to_string(),
    }
}

pub fn rank_artwork(rank: Rank) -> RankArtwork {
    let info = rank.info();
    RankArtwork {
        rank,
        image_path: format!("/assets/ranks/{}-rank.png", rank.as_str().to_lowercase()),
        title: info.title.to_string(),
        description: info.description.to_string(),
    }
}

/// `/assets/titles/<name-kebab>.png`
pub fn title_artwork_path(title_name: &str) -> String {
    format!("/assets/titles/{}.png", title_name.to_lowercase().replace(' ', "-"))
}

/// Catalog-provided image wins over the derived path
pub fn title_image(title: &Title) -> String {
    title
        .image_path
        .clone()
        .unwrap_or_else(|| title_artwork_path(&title.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::titles::default_catalog;

    #[test]
    fn test_ascension_picks_highest_milestone() {
        assert_eq!(ascension_milestone(0), 1);
        assert_eq!(ascension_milestone(1), 1);
        assert_eq!(ascension_milestone(9), 5);
        assert_eq!(ascension_milestone(74), 50);
        assert_eq!(ascension_milestone(100), 100);
        assert_eq!(ascension_milestone(999), 200);
    }

    #[test]
    fn test_ascension_artwork_paths() {
        let art = ascension_artwork(42);
        assert_eq!(art.milestone, 40);
        assert_eq!(art.image_path, "/assets/ascensions/level-40.png");
        assert!(art.description.contains("Shadow beasts"));
    }

    #[test]
    fn test_rank_artwork_path() {
        assert_eq!(rank_artwork(Rank::SSS).image_path, "/assets/ranks/sss-rank.png");
        assert_eq!(rank_artwork(Rank::E).image_path, "/assets/ranks/e-rank.png");
    }

    #[test]
    fn test_title_paths() {
        assert_eq!(title_artwork_path("Shadow Monarch"), "/assets/titles/shadow-monarch.png");
        let mut title = default_catalog().remove(0);
        assert_eq!(title_image(&title), "/assets/titles/the-reawakened.png");
        title.image_path = Some("/custom.png".into());
        assert_eq!(title_image(&title), "/custom.png");
    }
}
