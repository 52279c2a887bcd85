//! Play statistics
//!
//! Session-long play counts per artist and per genre. Counts only ever grow;
//! both maps are keyed in first-seen order so ties and chart columns stay
//! deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tunequeue_core::Song;

/// Plays recorded for one artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    pub artist: String,
    pub plays: u32,
}

/// One column of the genre chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreBar {
    pub genre: String,
    pub plays: u32,

    /// `plays / max_plays`, so the most played genre is exactly 1.0
    pub height: f32,
}

impl GenreBar {
    /// Bar height for a chart whose tallest column is `max_height`
    pub fn scaled_height(&self, max_height: f32) -> f32 {
        self.height * max_height
    }
}

/// Genre chart data, in first-played order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreHistogram {
    pub bars: Vec<GenreBar>,
    pub max_plays: u32,
}

/// Point-in-time copy of both statistics maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Most played first
    pub artists: Vec<ArtistCount>,

    /// `None` until something has been played
    pub genres: Option<GenreHistogram>,
}

/// Artist and genre play counters
#[derive(Debug, Clone, Default)]
pub struct PlayStats {
    artists: IndexMap<String, u32>,
    genres: IndexMap<String, u32>,
    total: u64,
}

impl PlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one play of `song` for both its artist and its genre
    pub fn record_play(&mut self, song: &Song) {
        *self.artists.entry(song.artist.clone()).or_insert(0) += 1;
        *self.genres.entry(song.genre.clone()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn artist_count(&self, artist: &str) -> u32 {
        self.artists.get(artist).copied().unwrap_or(0)
    }

    pub fn genre_count(&self, genre: &str) -> u32 {
        self.genres.get(genre).copied().unwrap_or(0)
    }

    /// Plays recorded this session, across all artists
    pub fn total_plays(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Artists by play count, highest first
    ///
    /// The sort is stable, so artists with equal counts stay in the order
    /// they were first played.
    pub fn artist_ranking(&self) -> Vec<ArtistCount> {
        let mut ranking: Vec<ArtistCount> = self
            .artists
            .iter()
            .map(|(artist, &plays)| ArtistCount {
                artist: artist.clone(),
                plays,
            })
            .collect();
        ranking.sort_by(|a, b| b.plays.cmp(&a.plays));
        ranking
    }

    /// Genre chart data, or `None` when nothing has been played yet
    pub fn genre_histogram(&self) -> Option<GenreHistogram> {
        let max_plays = self.genres.values().copied().max()?;
        if max_plays == 0 {
            return None;
        }

        let bars = self
            .genres
            .iter()
            .map(|(genre, &plays)| GenreBar {
                genre: genre.clone(),
                plays,
                height: plays as f32 / max_plays as f32,
            })
            .collect();

        Some(GenreHistogram { bars, max_plays })
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            artists: self.artist_ranking(),
            genres: self.genre_histogram(),
        }
    }
}
