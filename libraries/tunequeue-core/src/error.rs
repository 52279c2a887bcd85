/// Core error types for TuneQueue
use thiserror::Error;

use crate::types::SongId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for TuneQueue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No catalog entry has this identifier
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Two catalog entries share an identifier
    #[error("Duplicate song id in catalog: {0}")]
    DuplicateSong(SongId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
