//! Audio device backed by JavaScript callbacks

use js_sys::Function;
use std::time::Duration;
use tunequeue_core::AudioRef;
use wasm_bindgen::JsValue;

use crate::device::AudioDevice;
use crate::types::PlayAttempt;

/// Forwards device calls to page-supplied functions
///
/// The page wires these to an `HTMLAudioElement` and reports results back
/// through `WasmPlaybackController` (`resolvePlay`, `onTimeUpdate`, ...).
#[derive(Debug, Default)]
pub struct JsAudioDevice {
    pub(crate) on_load: Option<Function>,
    /// Called with `(attemptId, songId)`
    pub(crate) on_play: Option<Function>,
    pub(crate) on_pause: Option<Function>,
    /// Called with the position in seconds
    pub(crate) on_seek: Option<Function>,
}

impl AudioDevice for JsAudioDevice {
    fn load(&mut self, audio: &AudioRef) {
        if let Some(ref cb) = self.on_load {
            cb.call1(&JsValue::NULL, &JsValue::from_str(audio.as_str())).ok();
        }
    }

    fn play(&mut self, attempt: PlayAttempt) {
        if let Some(ref cb) = self.on_play {
            cb.call2(
                &JsValue::NULL,
                &JsValue::from_f64(attempt.id.get() as f64),
                &JsValue::from_str(attempt.song_id.as_str()),
            )
            .ok();
        }
    }

    fn pause(&mut self) {
        if let Some(ref cb) = self.on_pause {
            cb.call0(&JsValue::NULL).ok();
        }
    }

    fn set_position(&mut self, position: Duration) {
        if let Some(ref cb) = self.on_seek {
            cb.call1(&JsValue::NULL, &JsValue::from_f64(position.as_secs_f64()))
                .ok();
        }
    }
}
