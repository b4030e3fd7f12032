//! Error types for the orchestration layer
//!
//! The pure progression functions are total and never fail; only lookups,
//! persistence and configuration can.

use crate::quest::QuestStatus;

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("hunter not found: {0}")]
    HunterNotFound(String),

    #[error("quest not found: {0}")]
    QuestNotFound(String),

    #[error("quest {id} is not active (status {status:?})")]
    QuestNotActive { id: String, status: QuestStatus },

    #[error("quest {quest_id} does not belong to hunter {hunter_id}")]
    QuestOwnerMismatch { quest_id: String, hunter_id: String },

    #[error("no goals recorded for hunter {0}")]
    GoalsNotFound(String),

    #[error("title {title_id} is not owned by hunter {hunter_id}")]
    TitleNotOwned { hunter_id: String, title_id: String },

    #[error("hunter {hunter_id} kept changing during quest completion")]
    ConcurrentUpdate { hunter_id: String },

    #[error("repository error: {0}")]
    Repository(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for SystemError {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        SystemError::Repository(e.to_string())
    }
}

pub type SystemResult<T> = Result<T, SystemError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config extension: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
