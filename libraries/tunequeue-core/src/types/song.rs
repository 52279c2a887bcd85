//! Song types

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SongId;

/// Opaque locator for a playable audio resource
///
/// Handed to the audio device untouched; the core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(String);

impl AudioRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique, stable identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name (statistics key)
    pub artist: String,

    /// Genre name (statistics key)
    pub genre: String,

    /// Playable resource
    pub audio: AudioRef,
}

impl Song {
    /// Create a new song
    pub fn new(
        id: impl Into<SongId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        audio: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            audio: AudioRef::new(audio),
        }
    }

    /// Selection label: `"<title> — <artist> (<genre>)"`
    pub fn label(&self) -> String {
        format!("{} — {} ({})", self.title, self.artist, self.genre)
    }
}
