//! Recent plays
//!
//! Stack of every song played this session, most recent on top. Replays push
//! a fresh entry; existing entries never move.

use std::collections::VecDeque;
use tunequeue_core::Song;

use crate::error::{PlaybackError, Result};

/// LIFO playback history
///
/// Unbounded unless a limit is given, in which case the oldest entry is
/// discarded once the limit is reached.
#[derive(Debug, Clone, Default)]
pub struct RecentPlays {
    /// History buffer (most recent = back)
    songs: VecDeque<Song>,

    /// Maximum history size
    limit: Option<usize>,
}

impl RecentPlays {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history holding at most `limit` entries
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            songs: VecDeque::new(),
            limit,
        }
    }

    /// Record a play on top of the stack
    pub fn push(&mut self, song: Song) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.songs.len() >= limit {
                self.songs.pop_front(); // Remove oldest
            }
        }
        self.songs.push_back(song);
    }

    /// Remove and return the most recent play
    pub fn pop(&mut self) -> Result<Song> {
        self.songs.pop_back().ok_or(PlaybackError::EmptyStack)
    }

    /// Most recent play without removing it
    pub fn peek(&self) -> Result<&Song> {
        self.songs.back().ok_or(PlaybackError::EmptyStack)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Owned copy of the history, most recent first
    ///
    /// This is the display order, the reverse of push order.
    pub fn snapshot(&self) -> Vec<Song> {
        self.songs.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_song(id: &str) -> Song {
        Song::new(id, format!("Song {}", id), "Test Artist", "Pop", format!("audio/{}.mp3", id))
    }

    #[test]
    fn pop_returns_most_recent() {
        let mut history = RecentPlays::new();
        history.push(create_test_song("1"));
        history.push(create_test_song("2"));
        history.push(create_test_song("3"));

        assert_eq!(history.pop().unwrap().id.as_str(), "3");
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().id.as_str(), "2");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn empty_pop_and_peek() {
        let mut history = RecentPlays::new();
        assert_eq!(history.pop().unwrap_err(), PlaybackError::EmptyStack);
        assert_eq!(history.peek().unwrap_err(), PlaybackError::EmptyStack);
    }

    #[test]
    fn snapshot_is_top_first() {
        let mut history = RecentPlays::new();
        history.push(create_test_song("1"));
        history.push(create_test_song("2"));
        history.push(create_test_song("3"));

        let ids: Vec<_> = history.snapshot().into_iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(history.peek().unwrap().id.as_str(), "3");
    }

    #[test]
    fn replay_adds_second_entry() {
        let mut history = RecentPlays::new();
        history.push(create_test_song("1"));
        history.push(create_test_song("2"));
        history.push(create_test_song("1"));

        let ids: Vec<_> = history.snapshot().into_iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "1"]);
    }

    #[test]
    fn unbounded_by_default() {
        let mut history = RecentPlays::new();
        for i in 0..500 {
            history.push(create_test_song(&i.to_string()));
        }
        assert_eq!(history.len(), 500);
        assert_eq!(history.limit(), None);
    }

    #[test]
    fn bounded_drops_oldest() {
        let mut history = RecentPlays::with_limit(Some(3));
        for i in 1..=4 {
            history.push(create_test_song(&i.to_string()));
        }

        let ids: Vec<_> = history.snapshot().into_iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }

    #[test]
    fn clear_history() {
        let mut history = RecentPlays::new();
        history.push(create_test_song("1"));
        history.clear();
        assert!(history.is_empty());
    }
}
