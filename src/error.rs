//! Error types surfaced by loading, moving and driving.
//!
//! Library operations return these typed errors; the application edge
//! (`flow::run`) folds them into `anyhow::Error` like the rest of the engine.

use thiserror::Error;

/// An asset could not be turned into scene meshes.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be fetched (missing on disk, HTTP failure, ...).
    #[error("asset {file} is unavailable: {reason}")]
    Unavailable { file: String, reason: String },
    /// The bytes were fetched but are not a valid glTF/GLB document.
    #[error("asset {file} could not be parsed: {reason}")]
    Parse { file: String, reason: String },
    /// A sub-mesh index was requested that the loaded asset does not contain.
    #[error("asset {file} has {available} sub-meshes, index {index} was requested")]
    MissingSubMesh {
        file: String,
        index: usize,
        available: usize,
    },
}

impl AssetError {
    pub fn unavailable(file: &str, reason: impl ToString) -> Self {
        Self::Unavailable {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(file: &str, reason: impl ToString) -> Self {
        Self::Parse {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Why a character move did not complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Another move of the same character is still in flight.
    #[error("character is already moving")]
    Busy,
    /// The character's mesh is no longer part of the scene.
    #[error("character mesh is not in the scene")]
    MeshMissing,
    /// The animation was stopped or its mesh disposed before it finished.
    #[error("move was interrupted before it finished")]
    Interrupted,
}

/// The scene clock ran out of ticks before a driven future resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriveError {
    #[error("future did not resolve within {0} ticks")]
    Stalled(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("invalid step count `{0}`")]
    InvalidCount(String),
    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config could not be read: {0}")]
    Io(#[from] anyhow::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
