//! Request queue
//!
//! Pending song-play requests, served strictly first-in first-out. A song may
//! be requested any number of times; nothing is reordered or deduplicated.

use std::collections::VecDeque;
use tunequeue_core::Song;

use crate::error::{PlaybackError, Result};

/// FIFO queue of song requests
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    /// Front = next to be served
    songs: VecDeque<Song>,
}

impl RequestQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request to the back
    pub fn enqueue(&mut self, song: Song) {
        self.songs.push_back(song);
    }

    /// Remove and return the front request
    pub fn dequeue(&mut self) -> Result<Song> {
        self.songs.pop_front().ok_or(PlaybackError::EmptyQueue)
    }

    /// Front request without removing it
    pub fn peek(&self) -> Result<&Song> {
        self.songs.front().ok_or(PlaybackError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Drop every pending request
    pub fn clear(&mut self) {
        self.songs.clear();
    }

    /// Owned copy of the queue, front to back
    pub fn snapshot(&self) -> Vec<Song> {
        self.songs.iter().cloned().collect()
    }
}
