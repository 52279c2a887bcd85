//! Song catalog
//!
//! Fixed, ordered sequence of songs loaded once at startup.

use serde::Serialize;
use std::collections::HashSet;

use super::{Song, SongId};
use crate::error::{CoreError, Result};

/// Preloaded song library
///
/// Order is the display order of the selection list. Never mutated after
/// construction.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(songs.len());
        for song in &songs {
            if !seen.insert(&song.id) {
                return Err(CoreError::DuplicateSong(song.id.clone()));
            }
        }

        Ok(Self { songs })
    }

    /// Look up a song by identifier
    pub fn get(&self, id: &SongId) -> Result<&Song> {
        self.songs
            .iter()
            .find(|song| &song.id == id)
            .ok_or_else(|| CoreError::SongNotFound(id.clone()))
    }

    pub fn contains(&self, id: &SongId) -> bool {
        self.songs.iter().any(|song| &song.id == id)
    }

    /// First entry (the default selection)
    pub fn first(&self) -> Option<&Song> {
        self.songs.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
