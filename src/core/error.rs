use thiserror::Error;

use crate::core::types::{PlayerId, UnitId};

#[derive(Error, Debug)]
pub enum BotError {
    /// The engine was invoked in a state where it cannot act at all.
    #[error("{engine} cannot decide for player {player}: {reason}")]
    Decision {
        engine: &'static str,
        player: PlayerId,
        reason: String,
    },

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Command channel closed: {0}")]
    CommandChannelClosed(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl BotError {
    pub fn decision(engine: &'static str, player: PlayerId, reason: impl Into<String>) -> Self {
        BotError::Decision {
            engine,
            player,
            reason: reason.into(),
        }
    }

    /// Name of the engine that raised a contract violation, if any
    pub fn engine_name(&self) -> Option<&'static str> {
        match self {
            BotError::Decision { engine, .. } => Some(engine),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
