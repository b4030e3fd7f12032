//! Upgrade presentation
//!
//! Rates level-ups, rank-ups and title unlocks by significance and folds them
//! into a single plan of which panels to show after a quest completion.
//! Stateless: the plan is recomputed from scratch for every completion.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::progression::level::is_milestone_level;
use crate::progression::rank::Rank;
use crate::questgen::rng::pick;
use crate::titles::TitleRarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Epic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Level,
    Rank,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeEvent {
    pub kind: UpgradeKind,
    pub priority: Priority,
    pub should_show: bool,
    pub reason: String,
}

impl UpgradeEvent {
    fn new(
        kind: UpgradeKind,
        priority: Priority,
        should_show: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            should_show,
            reason: reason.into(),
        }
    }
}

/// Title categories that promote a Legendary unlock to Epic
pub const IMPORTANT_TITLE_CATEGORIES: [&str; 4] = ["Shadow", "Ascension", "Legendary", "Mythic"];

pub fn level_up_event(new_level: u32, levels_gained: u32) -> UpgradeEvent {
    use Priority::*;
    let kind = UpgradeKind::Level;

    if is_milestone_level(new_level) {
        UpgradeEvent::new(kind, Epic, true, format!("Reached milestone level {new_level}"))
    } else if levels_gained >= 5 {
        UpgradeEvent::new(kind, High, true, format!("Gained {levels_gained} levels in one quest"))
    } else if levels_gained >= 3 {
        UpgradeEvent::new(kind, Medium, true, format!("Gained {levels_gained} levels"))
    } else if new_level % 10 == 0 {
        UpgradeEvent::new(kind, Medium, true, format!("Reached level {new_level} (multiple of 10)"))
    } else if new_level % 5 == 0 {
        UpgradeEvent::new(kind, Low, true, format!("Reached level {new_level} (multiple of 5)"))
    } else {
        UpgradeEvent::new(kind, Low, false, "Regular level progression")
    }
}

/// Rank promotions always show
pub fn rank_up_event(old_rank: Rank, new_rank: Rank) -> UpgradeEvent {
    let priority = match new_rank {
        Rank::S | Rank::SS | Rank::SSS => Priority::Epic,
        Rank::B | Rank::A => Priority::High,
        Rank::E | Rank::D | Rank::C => Priority::Medium,
    };
    UpgradeEvent::new(
        UpgradeKind::Rank,
        priority,
        true,
        format!("Promoted from {old_rank}-Rank to {new_rank}-Rank"),
    )
}

/// `unlocked_titles_count` is the hunter's total after this unlock.
pub fn title_unlock_event(
    rarity: TitleRarity,
    category: &str,
    unlocked_titles_count: usize,
) -> UpgradeEvent {
    let kind = UpgradeKind::Title;
    let base = match rarity {
        TitleRarity::Common | TitleRarity::Rare => Priority::Low,
        TitleRarity::Epic => Priority::Medium,
        TitleRarity::Legendary => Priority::High,
        TitleRarity::Mythic => Priority::Epic,
    };
    let important = IMPORTANT_TITLE_CATEGORIES.contains(&category);

    match base {
        Priority::Epic => UpgradeEvent::new(
            kind,
            Priority::Epic,
            true,
            format!("Unlocked {rarity} title in {category} category"),
        ),
        Priority::High if important => UpgradeEvent::new(
            kind,
            Priority::Epic,
            true,
            format!("Unlocked {rarity} title in {category} category"),
        ),
        Priority::High | Priority::Medium => {
            UpgradeEvent::new(kind, base, true, format!("Unlocked {rarity} title"))
        }
        Priority::Low if unlocked_titles_count == 1 => {
            UpgradeEvent::new(kind, Priority::Medium, true, "First title unlock")
        }
        Priority::Low => UpgradeEvent::new(kind, Priority::Low, false, "Common title unlock"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeDecision {
    pub show_level_up: bool,
    pub show_rank_up: bool,
    pub show_title_unlock: bool,
    pub main_event: Option<UpgradeKind>,
    pub priority: Priority,
    pub message: String,
}

impl UpgradeDecision {
    fn quiet() -> Self {
        Self {
            show_level_up: false,
            show_rank_up: false,
            show_title_unlock: false,
            main_event: None,
            priority: Priority::Low,
            message: "Quest completed".to_string(),
        }
    }
}

/// Fold the rated events into one presentation plan.
///
/// Precedence: an epic rank-up always surfaces; otherwise an epic main
/// event shows alone; a high main event shows alone (titles only if a high
/// title exists); anything else shows every non-low event.
pub fn decide_upgrade_presentation(
    level_event: Option<&UpgradeEvent>,
    rank_event: Option<&UpgradeEvent>,
    title_events: &[UpgradeEvent],
) -> UpgradeDecision {
    let level_event = level_event.filter(|e| e.should_show);
    let rank_event = rank_event.filter(|e| e.should_show);

    let mut shown: Vec<&UpgradeEvent> = level_event
        .into_iter()
        .chain(rank_event)
        .chain(title_events.iter().filter(|e| e.should_show))
        .collect();

    // stable: ties keep level, rank, title order
    shown.sort_by(|a, b| b.priority.cmp(&a.priority));

    let Some(main) = shown.first() else {
        return UpgradeDecision::quiet();
    };

    if let Some(rank) = rank_event.filter(|e| e.priority == Priority::Epic) {
        return UpgradeDecision {
            show_level_up: level_event.is_some(),
            show_rank_up: true,
            show_title_unlock: title_events
                .iter()
                .any(|t| t.should_show && t.priority == Priority::Epic),
            main_event: Some(UpgradeKind::Rank),
            priority: Priority::Epic,
            message: rank.reason.clone(),
        };
    }

    match main.priority {
        Priority::Epic => UpgradeDecision {
            show_level_up: main.kind == UpgradeKind::Level,
            show_rank_up: main.kind == UpgradeKind::Rank,
            show_title_unlock: main.kind == UpgradeKind::Title,
            main_event: Some(main.kind),
            priority: Priority::Epic,
            message: main.reason.clone(),
        },
        Priority::High => UpgradeDecision {
            show_level_up: main.kind == UpgradeKind::Level,
            show_rank_up: main.kind == UpgradeKind::Rank,
            show_title_unlock: main.kind == UpgradeKind::Title
                && title_events.iter().any(|t| t.priority == Priority::High),
            main_event: Some(main.kind),
            priority: Priority::High,
            message: main.reason.clone(),
        },
        _ => UpgradeDecision {
            show_level_up: level_event.is_some_and(|e| e.priority != Priority::Low),
            show_rank_up: rank_event.is_some(),
            show_title_unlock: title_events
                .iter()
                .any(|t| t.should_show && t.priority != Priority::Low),
            main_event: Some(main.kind),
            priority: main.priority,
            message: main.reason.clone(),
        },
    }
}

const EPIC_LINES: [&str; 4] = [
    "The power coursing through you... this is just the beginning.",
    "You have transcended mortal limits.",
    "The shadows themselves bow to your will.",
    "This is the power of a true hunter.",
];

const HIGH_LINES: [&str; 4] = [
    "Significant growth detected.",
    "Your power increases dramatically.",
    "You grow stronger with each battle.",
    "The System acknowledges your progress.",
];

const MEDIUM_LINES: [&str; 4] = [
    "Steady progress continues.",
    "You advance along the path.",
    "Small steps lead to greatness.",
    "The grind never stops.",
];

const LOW_LINES: [&str; 4] = [
    "Quest complete.",
    "Experience gained.",
    "Progress recorded.",
    "Another step forward.",
];

pub fn completion_lines(priority: Priority) -> &'static [&'static str] {
    match priority {
        Priority::Epic => &EPIC_LINES,
        Priority::High => &HIGH_LINES,
        Priority::Medium => &MEDIUM_LINES,
        Priority::Low => &LOW_LINES,
    }
}

/// Flavour line for the completion screen
pub fn completion_message<R: Rng + ?Sized>(priority: Priority, rng: &mut R) -> &'static str {
    let lines = completion_lines(priority);
    pick(lines, rng).copied().unwrap_or(LOW_LINES[0])
}
