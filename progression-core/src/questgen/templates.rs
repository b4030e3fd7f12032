//! Quest template pools
//!
//! `{value}` is replaced by the difficulty-scaled target; boss titles may
//! also carry `{weakness}`.

use crate::quest::QuestCategory;

pub const VALUE_PLACEHOLDER: &str = "{value}";
pub const WEAKNESS_PLACEHOLDER: &str = "{weakness}";

/// A daily or raid template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub title_template: &'static str,
    pub description: &'static str,
    pub category: QuestCategory,
    pub base_value: u32,
    pub base_xp: u64,
}

impl QuestTemplate {
    pub fn render_title(&self, value: u64) -> String {
        self.title_template.replace(VALUE_PLACEHOLDER, &value.to_string())
    }
}

/// A named weekly boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossTemplate {
    pub title_template: &'static str,
    pub description: &'static str,
    pub category: QuestCategory,
    pub base_value: u32,
    pub base_xp: u64,
    pub boss_name: &'static str,
}

const fn daily(
    title_template: &'static str,
    description: &'static str,
    category: QuestCategory,
    base_value: u32,
    base_xp: u64,
) -> QuestTemplate {
    QuestTemplate {
        title_template,
        description,
        category,
        base_value,
        base_xp,
    }
}

pub const BUSINESS_DAILIES: [QuestTemplate; 5] = [
    daily(
        "Message {value} high-value leads",
        "Reach out to qualified prospects who match your ideal client profile",
        QuestCategory::Business,
        15,
        200,
    ),
    daily(
        "Pitch your offer to {value} potential clients",
        "Present your coaching or automation services with confidence",
        QuestCategory::Business,
        5,
        300,
    ),
    daily(
        "Build {value} automation flows",
        "Create systems that demonstrate your expertise",
        QuestCategory::Business,
        2,
        400,
    ),
    daily(
        "Follow up with {value} warm prospects",
        "Nurture your pipeline with strategic follow-ups",
        QuestCategory::Business,
        20,
        150,
    ),
    daily(
        "Close {value} deals today",
        "Convert interested prospects into paying clients",
        QuestCategory::Business,
        1,
        600,
    ),
];

pub const SKILL_DAILIES: [QuestTemplate; 5] = [
    daily(
        "Study AI engineering for {value} minutes",
        "Deepen your technical knowledge and capabilities",
        QuestCategory::Skill,
        60,
        250,
    ),
    daily(
        "Build {value} portfolio demos",
        "Create showcase projects that prove your abilities",
        QuestCategory::Skill,
        1,
        400,
    ),
    daily(
        "Write {value} case studies",
        "Document your success stories to attract clients",
        QuestCategory::Skill,
        1,
        350,
    ),
    daily(
        "Practice coding for {value} minutes",
        "Sharpen your technical implementation skills",
        QuestCategory::Skill,
        90,
        200,
    ),
    daily(
        "Master {value} new frameworks",
        "Expand your technical toolkit",
        QuestCategory::Skill,
        1,
        500,
    ),
];

pub const PHYSICAL_DAILIES: [QuestTemplate; 5] = [
    daily(
        "Complete {value} push-ups",
        "Build physical strength like a true hunter",
        QuestCategory::Physical,
        30,
        100,
    ),
    daily(
        "Train for {value} minutes",
        "Forge your body into a weapon",
        QuestCategory::Physical,
        45,
        150,
    ),
    daily(
        "Complete {value} burpees",
        "Full-body conditioning for peak performance",
        QuestCategory::Physical,
        25,
        200,
    ),
    daily(
        "Run {value} kilometers",
        "Build endurance worthy of a Shadow Monarch",
        QuestCategory::Physical,
        5,
        250,
    ),
    daily(
        "Hold plank for {value} seconds",
        "Core strength is the foundation of power",
        QuestCategory::Physical,
        120,
        150,
    ),
];

pub const MIND_DAILIES: [QuestTemplate; 5] = [
    daily(
        "Meditate for {value} minutes",
        "Sharpen your mental focus and willpower",
        QuestCategory::Mind,
        20,
        180,
    ),
    daily(
        "Journal for {value} minutes",
        "Reflect on your journey and growth",
        QuestCategory::Mind,
        15,
        150,
    ),
    daily(
        "Plan your strategy for {value} minutes",
        "Prepare for tomorrow's battles",
        QuestCategory::Mind,
        20,
        160,
    ),
    daily(
        "Visualize your goals for {value} minutes",
        "Manifest your desired future",
        QuestCategory::Mind,
        10,
        140,
    ),
    daily(
        "Read {value} pages of development material",
        "Feed your mind with knowledge",
        QuestCategory::Mind,
        30,
        170,
    ),
];

pub fn daily_pool(category: QuestCategory) -> &'static [QuestTemplate] {
    match category {
        QuestCategory::Business => &BUSINESS_DAILIES,
        QuestCategory::Skill => &SKILL_DAILIES,
        QuestCategory::Physical => &PHYSICAL_DAILIES,
        QuestCategory::Mind => &MIND_DAILIES,
    }
}

pub const SHADOW_SELF: &str = "The Shadow Self";

pub const BOSS_TEMPLATES: [BossTemplate; 7] = [
    BossTemplate {
        title_template: "BOSS RAID: Close {value} High-Value Deals",
        description: "A legendary sales challenge appears. \
            Only the strongest hunters can convert this many prospects.",
        category: QuestCategory::Business,
        base_value: 10,
        base_xp: 2000,
        boss_name: "The Prospector King",
    },
    BossTemplate {
        title_template: "BOSS RAID: Build {value} Complete Automation Systems",
        description: "The Automation Golem challenges you to prove your technical mastery.",
        category: QuestCategory::Skill,
        base_value: 5,
        base_xp: 2500,
        boss_name: "The Automation Golem",
    },
    BossTemplate {
        title_template: "BOSS RAID: Maintain {value}-Day Perfect Streak",
        description: "The Consistency Demon tests your discipline and willpower.",
        category: QuestCategory::Mind,
        base_value: 7,
        base_xp: 1800,
        boss_name: "The Consistency Demon",
    },
    BossTemplate {
        title_template: "BOSS RAID: Complete {value} Full Training Sessions",
        description: "The Iron Titan demands physical excellence.",
        category: QuestCategory::Physical,
        base_value: 7,
        base_xp: 1500,
        boss_name: "The Iron Titan",
    },
    BossTemplate {
        title_template: "BOSS RAID: Master {value} Advanced Skills",
        description: "The Knowledge Lich guards the secrets of mastery.",
        category: QuestCategory::Skill,
        base_value: 3,
        base_xp: 3000,
        boss_name: "The Knowledge Lich",
    },
    BossTemplate {
        title_template: "BOSS RAID: Generate ${value}K in Revenue",
        description: "The Wealth Dragon hoards the treasures you seek.",
        category: QuestCategory::Business,
        base_value: 10,
        base_xp: 3500,
        boss_name: "The Wealth Dragon",
    },
    BossTemplate {
        title_template: "BOSS RAID: Overcome Your {weakness}",
        description: "Face your inner demon and emerge victorious.",
        category: QuestCategory::Mind,
        base_value: 1,
        base_xp: 2200,
        boss_name: SHADOW_SELF,
    },
];

/// Bosses of one category, in pool order
pub fn bosses_in(category: QuestCategory) -> Vec<&'static BossTemplate> {
    BOSS_TEMPLATES
        .iter()
        .filter(|b| b.category == category)
        .collect()
}

pub fn shadow_self() -> &'static BossTemplate {
    &BOSS_TEMPLATES[BOSS_TEMPLATES.len() - 1]
}

pub const RAID_TEMPLATES: [QuestTemplate; 4] = [
    daily(
        "Close {value} leads this month",
        "Massive sales push",
        QuestCategory::Business,
        50,
        5000,
    ),
    daily(
        "Build {value} client automation systems",
        "Scale your delivery",
        QuestCategory::Skill,
        10,
        4000,
    ),
    daily(
        "Achieve {value}-day perfect streak",
        "Ultimate consistency",
        QuestCategory::Mind,
        30,
        3000,
    ),
    daily(
        "Master a new skill completely",
        "Reach expert level",
        QuestCategory::Skill,
        1,
        5000,
    ),
];
