//! Simulated audio device
//!
//! Stands in for a real audio output. Every call is answered by queueing the
//! `DeviceEvent`s a real device would eventually report; the session pumps
//! them back into the controller after each command.

use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, trace};
use tunequeue_core::AudioRef;
use tunequeue_playback::{AudioDevice, DeviceEvent, PlayAttempt};

/// Message used when playback is configured to fail
const REJECTED: &str = "NotAllowedError: play() was rejected by the device";

#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    track_length: Duration,
    fail_playback: bool,

    loaded: Option<AudioRef>,
    playing: bool,
    position: Duration,

    outbox: VecDeque<DeviceEvent>,
}

impl SimulatedDevice {
    pub fn new(track_length: Duration, fail_playback: bool) -> Self {
        Self {
            track_length,
            fail_playback,
            loaded: None,
            playing: false,
            position: Duration::ZERO,
            outbox: VecDeque::new(),
        }
    }

    pub fn loaded(&self) -> Option<&AudioRef> {
        self.loaded.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Let `elapsed` of wall time pass
    ///
    /// Reports progress while playing and `Ended` once the track runs out.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            trace!("advance while not playing");
            return;
        }

        self.position = self.position.saturating_add(elapsed).min(self.track_length);
        self.outbox.push_back(DeviceEvent::TimeProgress {
            position: self.position,
        });

        if self.position >= self.track_length {
            self.finish();
        }
    }

    /// Jump to the end of the loaded track
    pub fn finish(&mut self) {
        debug!(audio = ?self.loaded, "track ended");
        self.playing = false;
        self.position = self.track_length;
        self.outbox.push_back(DeviceEvent::Ended);
    }

    /// Report an asynchronous device failure
    pub fn fail(&mut self, message: impl Into<String>) {
        self.playing = false;
        self.outbox.push_back(DeviceEvent::PlaybackError {
            message: message.into(),
        });
    }

    /// Notifications not yet delivered, oldest first
    pub fn take_events(&mut self) -> Vec<DeviceEvent> {
        self.outbox.drain(..).collect()
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(Duration::from_secs(180), false)
    }
}

impl AudioDevice for SimulatedDevice {
    fn load(&mut self, audio: &AudioRef) {
        debug!(%audio, "load");
        self.loaded = Some(audio.clone());
        self.playing = false;
        self.position = Duration::ZERO;
        self.outbox.push_back(DeviceEvent::MetadataLoaded {
            duration: self.track_length,
        });
    }

    fn play(&mut self, attempt: PlayAttempt) {
        if self.fail_playback || self.loaded.is_none() {
            self.outbox
                .push_back(DeviceEvent::resolved_err(attempt.id, REJECTED));
            return;
        }

        self.playing = true;
        self.outbox.push_back(DeviceEvent::resolved_ok(attempt.id));
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_position(&mut self, position: Duration) {
        self.position = position.min(self.track_length);
    }
}
