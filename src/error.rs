use std::path::PathBuf;

use crate::game::{Action, ActionError, Phase};

/// Errors that can occur while driving training episodes.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("agent selected illegal action {action:?} in phase {phase:?}: {source}")]
    IllegalAction {
        action: Action,
        phase: Phase,
        source: ActionError,
    },

    #[error("no legal action available in phase {phase:?}")]
    NoLegalAction { phase: Phase },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
