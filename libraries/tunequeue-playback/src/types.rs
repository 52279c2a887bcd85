//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use tunequeue_core::SongId;

/// Transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// Nothing playing: no song yet, or the last song ran to its end
    Idle,

    /// A play or resume attempt is pending on the audio device
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (also the fallback after a failed attempt)
    Paused,

    /// Song loaded, position reset to zero, not advancing
    Stopped,
}

impl TransportStatus {
    /// Only a resolved, successful attempt counts as playing
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    /// Play/pause button glyph for this status
    pub fn glyph(self) -> &'static str {
        if self.is_playing() {
            "⏸"
        } else {
            "▶"
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one play/resume attempt
///
/// Strictly increasing within a controller, so a late resolution can be
/// matched against the attempt that is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(u64);

impl AttemptId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pending request for the audio device to start producing sound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayAttempt {
    pub id: AttemptId,

    /// Song the attempt targets
    pub song_id: SongId,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum recent-plays size (default: unbounded)
    pub history_limit: Option<usize>,

    /// Pixel height of the tallest genre bar (default: 140)
    pub chart_max_height: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            chart_max_height: 140.0,
        }
    }
}
