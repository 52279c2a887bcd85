/// Console error types
use thiserror::Error;
use tunequeue_core::CoreError;
use tunequeue_playback::PlaybackError;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),

    #[error("{0}")]
    Playback(#[from] PlaybackError),

    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

impl ConsoleError {
    pub fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        ConsoleError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors that end the session instead of being reported and skipped
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConsoleError::Io(_) | ConsoleError::Json(_))
    }
}
