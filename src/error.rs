//! Crate error type
//!
//! None of these ever abort a running simulation: asset and render faults are
//! logged at the call site and the frame carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A sprite or sound could not be used (not decoded yet, playback blocked)
    #[error("asset `{name}` unavailable: {reason}")]
    AssetUnavailable { name: &'static str, reason: String },

    /// Malformed geometry handed to the collision code
    #[error("invalid collision input: {0}")]
    InvalidCollisionInput(String),

    /// Tuning document failed to parse or validate
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("render failure: {0}")]
    Render(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::InvalidConfig(err.to_string())
    }
}

pub type GameResult<T> = Result<T, GameError>;
