//! TuneQueue - Playback Management
//!
//! Platform-agnostic request queue and playback control for TuneQueue.
//!
//! This crate provides:
//! - Request queue (FIFO, duplicates allowed)
//! - Recent plays (LIFO, optional bound)
//! - Play statistics (artist ranking, genre histogram)
//! - Playback controller (transport state machine, auto-advance on end)
//! - Change events for the presentation layer
//!
//! # Architecture
//!
//! `tunequeue-playback` never decodes or outputs audio. The host supplies an
//! [`AudioDevice`] and reports back through [`DeviceEvent`]s: an HTML audio
//! element in the browser (see the `wasm` feature), a simulated device in the
//! console application, a recording fake in tests.
//!
//! # Example: Serving Requests
//!
//! ```rust
//! use std::time::Duration;
//! use tunequeue_core::{AudioRef, Catalog, Song, SongId};
//! use tunequeue_playback::{
//!     AudioDevice, DeviceEvent, PlayAttempt, PlaybackConfig, PlaybackController,
//!     TransportStatus,
//! };
//!
//! #[derive(Default)]
//! struct QuietDevice {
//!     attempts: Vec<PlayAttempt>,
//! }
//!
//! impl AudioDevice for QuietDevice {
//!     fn load(&mut self, _audio: &AudioRef) {}
//!     fn play(&mut self, attempt: PlayAttempt) {
//!         self.attempts.push(attempt);
//!     }
//!     fn pause(&mut self) {}
//!     fn set_position(&mut self, _position: Duration) {}
//! }
//!
//! let catalog = Catalog::new(vec![
//!     Song::new("1", "Midnight Drive", "Luna Waves", "Lo-fi", "audio/midnight-drive.mp3"),
//!     Song::new("2", "Neon Skies", "Pulse City", "EDM", "audio/neon-skies.mp3"),
//! ])
//! .unwrap();
//!
//! let mut controller =
//!     PlaybackController::new(catalog, QuietDevice::default(), PlaybackConfig::default());
//!
//! controller.enqueue_by_id(&SongId::new("1")).unwrap();
//! controller.enqueue_by_id(&SongId::new("2")).unwrap();
//! controller.serve_next().unwrap();
//!
//! // The device answers asynchronously
//! let attempt = controller.device().attempts[0].id;
//! controller.handle_device_event(DeviceEvent::resolved_ok(attempt));
//!
//! assert_eq!(controller.status(), TransportStatus::Playing);
//! assert_eq!(controller.now_playing().unwrap().title, "Midnight Drive");
//! assert_eq!(controller.queue_len(), 1);
//! assert_eq!(controller.stats().artist_count("Luna Waves"), 1);
//! ```

mod device;
mod error;
mod events;
mod history;
mod manager;
mod queue;
mod stats;
mod time;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use device::{AudioDevice, DeviceEvent};
pub use error::{PlaybackError, Result};
pub use events::{EventBus, Listener, PlaybackEvent, SubscriptionId};
pub use history::RecentPlays;
pub use manager::PlaybackController;
pub use queue::RequestQueue;
pub use stats::{ArtistCount, GenreBar, GenreHistogram, PlayStats, StatsSnapshot};
pub use time::{as_millis_u64, format_seconds, format_time};
pub use types::{AttemptId, PlayAttempt, PlaybackConfig, TransportStatus};
