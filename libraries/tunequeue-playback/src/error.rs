//! Error types for playback management

use thiserror::Error;
use tunequeue_core::{CoreError, SongId};

/// Playback errors
///
/// Every variant is recoverable; none of them should end the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Dequeue or serve-next with nothing pending
    #[error("Queue is empty")]
    EmptyQueue,

    /// Pop or peek on an empty recent-plays stack
    #[error("No recent plays")]
    EmptyStack,

    /// Identifier not present in the catalog
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// The audio device rejected load, play or resume
    #[error("Playback failed: {0}")]
    PlaybackFailure(String),

    /// Seek requested before the device reported a duration
    #[error("Track duration is not known yet")]
    DurationUnknown,

    /// Seek fraction was NaN or infinite
    #[error("Invalid seek position: {0}")]
    InvalidSeek(f64),

    /// Other catalog errors
    #[error(transparent)]
    Core(CoreError),
}

impl From<CoreError> for PlaybackError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SongNotFound(id) => Self::SongNotFound(id),
            other => Self::Core(other),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
