//! Ascension log rows written when an upgrade is presented

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artwork::{AscensionArtwork, RankArtwork};
use crate::progression::rank::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AscensionEventType {
    Level,
    Rank,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AscensionLogEntry {
    pub hunter_id: String,
    pub event_type: AscensionEventType,
    pub from_value: String,
    pub to_value: String,
    pub image_shown: String,
    pub created_at: DateTime<Utc>,
}

impl AscensionLogEntry {
    pub fn level(
        hunter_id: &str,
        old_level: u32,
        new_level: u32,
        artwork: &AscensionArtwork,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            hunter_id: hunter_id.to_string(),
            event_type: AscensionEventType::Level,
            from_value: old_level.to_string(),
            to_value: new_level.to_string(),
            image_shown: artwork.image_path.clone(),
            created_at: at,
        }
    }

    pub fn rank(hunter_id: &str, old_rank: Rank, artwork: &RankArtwork, at: DateTime<Utc>) -> Self {
        Self {
            hunter_id: hunter_id.to_string(),
            event_type: AscensionEventType::Rank,
            from_value: old_rank.to_string(),
            to_value: artwork.rank.to_string(),
            image_shown: artwork.image_path.clone(),
            created_at: at,
        }
    }

    /// Title unlocks have no "from" state
    pub fn title(hunter_id: &str, title_name: &str, image: String, at: DateTime<Utc>) -> Self {
        Self {
            hunter_id: hunter_id.to_string(),
            event_type: AscensionEventType::Title,
            from_value: String::new(),
            to_value: title_name.to_string(),
            image_shown: image,
            created_at: at,
        }
    }
}
