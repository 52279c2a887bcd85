//! Playback Events
//!
//! Change notifications for the presentation layer. Each mutating controller
//! operation emits events carrying the aggregate it touched, so a renderer
//! can redraw only what changed.

use serde::{Deserialize, Serialize};
use std::fmt;
use tunequeue_core::Song;

use crate::stats::StatsSnapshot;
use crate::types::TransportStatus;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Selected catalog entry changed
    SelectionChanged {
        song: Song,
    },

    /// A new song became current
    NowPlayingChanged {
        song: Song,
        /// Plays recorded so far for the song's artist, this one included
        artist_plays: u32,
    },

    /// Transport status changed
    StateChanged {
        status: TransportStatus,
    },

    /// Request queue contents, front to back
    QueueChanged {
        songs: Vec<Song>,
    },

    /// Recent plays, most recent first
    HistoryChanged {
        songs: Vec<Song>,
    },

    /// Artist ranking and genre histogram
    StatsChanged {
        stats: StatsSnapshot,
    },

    /// Playback position moved
    PositionUpdate {
        position_ms: u64,
        duration_ms: Option<u64>,
    },

    /// Device reported the current song's duration
    DurationChanged {
        duration_ms: u64,
    },

    /// Informational message for the user (not a fault)
    Notice {
        message: String,
    },

    /// Recoverable error the user should see
    Error {
        message: String,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked for every emitted event
pub type Listener = Box<dyn FnMut(&PlaybackEvent)>;

/// Listener registry
///
/// Listeners only ever see events by shared reference and are called after
/// the controller has finished the mutation that produced them.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &PlaybackEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
