//! Audio device seam
//!
//! The host platform owns decoding and output (an HTML audio element in the
//! browser, a simulated device in the console). The controller drives it
//! through `AudioDevice` and hears back from it through `DeviceEvent`s.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tunequeue_core::AudioRef;

use crate::types::{AttemptId, PlayAttempt};

/// Host-provided audio playback
///
/// `play` must not block: the device starts the attempt and later reports
/// `DeviceEvent::PlayResolved` with the same attempt id.
pub trait AudioDevice {
    /// Point the device at a new resource
    fn load(&mut self, audio: &AudioRef);

    /// Start (or resume) producing sound
    fn play(&mut self, attempt: PlayAttempt);

    fn pause(&mut self);

    fn set_position(&mut self, position: Duration);
}

/// Notifications from the audio device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Periodic playback position
    TimeProgress { position: Duration },

    /// Duration of the loaded resource became known
    MetadataLoaded { duration: Duration },

    /// Loaded resource played to its end
    Ended,

    /// Decoding or output failed outside of a play attempt
    PlaybackError { message: String },

    /// Outcome of an earlier `AudioDevice::play`
    PlayResolved {
        attempt: AttemptId,
        outcome: Result<(), String>,
    },
}

impl DeviceEvent {
    pub fn resolved_ok(attempt: AttemptId) -> Self {
        Self::PlayResolved {
            attempt,
            outcome: Ok(()),
        }
    }

    pub fn resolved_err(attempt: AttemptId, message: impl Into<String>) -> Self {
        Self::PlayResolved {
            attempt,
            outcome: Err(message.into()),
        }
    }
}
