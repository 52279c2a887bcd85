//! WASM-compatible PlaybackController wrapper

use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tunequeue_core::{Catalog, Song, SongId};
use wasm_bindgen::prelude::*;

use super::device::JsAudioDevice;
use crate::{
    AttemptId, DeviceEvent, PlaybackConfig, PlaybackController, PlaybackError, PlaybackEvent,
};

/// WASM-compatible playback controller
///
/// Song records passed in from JavaScript use string ids.
#[wasm_bindgen]
pub struct WasmPlaybackController {
    inner: PlaybackController<JsAudioDevice>,

    // Event callback, shared with the listener registered on `inner`
    on_event: Rc<RefCell<Option<Function>>>,
}

#[wasm_bindgen]
impl WasmPlaybackController {
    /// Create a controller from an array of song records
    #[wasm_bindgen(constructor)]
    pub fn new(songs: JsValue) -> Result<WasmPlaybackController, JsValue> {
        console_error_panic_hook::set_once();

        let songs: Vec<Song> = serde_wasm_bindgen::from_value(songs)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse songs: {}", e)))?;
        let catalog = Catalog::new(songs).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut inner =
            PlaybackController::new(catalog, JsAudioDevice::default(), PlaybackConfig::default());

        let on_event: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&on_event);
        inner.subscribe(move |event: &PlaybackEvent| {
            if let Some(ref cb) = *sink.borrow() {
                if let Ok(js_event) = serde_wasm_bindgen::to_value(event) {
                    cb.call1(&JsValue::NULL, &js_event).ok();
                }
            }
        });

        Ok(Self { inner, on_event })
    }

    // ===== Wiring =====

    /// Register the change-event callback
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        *self.on_event.borrow_mut() = Some(callback);
    }

    /// Connect the audio element: `load(src)`, `play(attemptId, songId)`,
    /// `pause()`, `seek(seconds)`
    #[wasm_bindgen(js_name = bindAudio)]
    pub fn bind_audio(&mut self, load: Function, play: Function, pause: Function, seek: Function) {
        let device = self.inner.device_mut();
        device.on_load = Some(load);
        device.on_play = Some(play);
        device.on_pause = Some(pause);
        device.on_seek = Some(seek);
    }

    // ===== User Intents =====

    pub fn select(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.select(&SongId::new(id)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = addToQueue)]
    pub fn add_to_queue(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.enqueue_by_id(&SongId::new(id)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = addSelectedToQueue)]
    pub fn add_selected_to_queue(&mut self) -> bool {
        self.inner.enqueue_selected()
    }

    /// Play now; also used for clicks on queue and recent-play items
    #[wasm_bindgen(js_name = playNow)]
    pub fn play_now(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.play_now(&SongId::new(id)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = playSelected)]
    pub fn play_selected(&mut self) -> bool {
        self.inner.play_selected()
    }

    /// Returns false when the queue was empty (a notice event is emitted)
    #[wasm_bindgen(js_name = serveNext)]
    pub fn serve_next(&mut self) -> bool {
        self.inner.serve_next().is_ok()
    }

    #[wasm_bindgen(js_name = clearQueue)]
    pub fn clear_queue(&mut self) {
        self.inner.clear_queue();
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.inner.clear_history();
    }

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
    }

    pub fn stop(&mut self) {
        self.inner.stop();
    }

    /// Seek by fraction (0.0 - 1.0); rejected until the duration is known
    pub fn seek(&mut self, fraction: f64) -> Result<(), JsValue> {
        self.inner.seek(fraction).map_err(to_js)
    }

    // ===== Audio Element Notifications =====

    /// Outcome of the `play()` promise for `attempt_id`
    #[wasm_bindgen(js_name = resolvePlay)]
    pub fn resolve_play(&mut self, attempt_id: f64, error: Option<String>) {
        let attempt = AttemptId::new(attempt_id as u64);
        let outcome = match error {
            Some(message) => Err(message),
            None => Ok(()),
        };
        self.inner
            .handle_device_event(DeviceEvent::PlayResolved { attempt, outcome });
    }

    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, seconds: f64) {
        if let Ok(position) = Duration::try_from_secs_f64(seconds) {
            self.inner
                .handle_device_event(DeviceEvent::TimeProgress { position });
        }
    }

    #[wasm_bindgen(js_name = onLoadedMetadata)]
    pub fn on_loaded_metadata(&mut self, seconds: f64) {
        if let Ok(duration) = Duration::try_from_secs_f64(seconds) {
            self.inner
                .handle_device_event(DeviceEvent::MetadataLoaded { duration });
        }
    }

    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self) {
        self.inner.handle_device_event(DeviceEvent::Ended);
    }

    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, message: String) {
        self.inner
            .handle_device_event(DeviceEvent::PlaybackError { message });
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.inner.status().to_string()
    }

    #[wasm_bindgen(js_name = playButtonGlyph)]
    pub fn play_button_glyph(&self) -> String {
        self.inner.status().glyph().to_string()
    }

    #[wasm_bindgen(js_name = getNowPlaying)]
    pub fn get_now_playing(&self) -> JsValue {
        to_js_value(&self.inner.now_playing())
    }

    #[wasm_bindgen(js_name = getSelected)]
    pub fn get_selected(&self) -> JsValue {
        to_js_value(&self.inner.selected())
    }

    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> JsValue {
        to_js_value(&self.inner.queue_snapshot())
    }

    /// Recent plays, most recent first
    #[wasm_bindgen(js_name = getHistory)]
    pub fn get_history(&self) -> JsValue {
        to_js_value(&self.inner.history_snapshot())
    }

    #[wasm_bindgen(js_name = getArtistRanking)]
    pub fn get_artist_ranking(&self) -> JsValue {
        to_js_value(&self.inner.artist_ranking())
    }

    /// `null` until something has been played
    #[wasm_bindgen(js_name = getGenreHistogram)]
    pub fn get_genre_histogram(&self) -> JsValue {
        to_js_value(&self.inner.genre_histogram())
    }

    #[wasm_bindgen(js_name = chartMaxHeight)]
    pub fn chart_max_height(&self) -> f32 {
        self.inner.config().chart_max_height
    }

    #[wasm_bindgen(js_name = currentArtistPlays)]
    pub fn current_artist_plays(&self) -> u32 {
        self.inner.current_artist_plays()
    }

    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, id: &str) -> bool {
        self.inner.is_current(&SongId::new(id))
    }

    #[wasm_bindgen(js_name = getProgress)]
    pub fn get_progress(&self) -> f64 {
        self.inner.progress()
    }

    #[wasm_bindgen(js_name = elapsedLabel)]
    pub fn elapsed_label(&self) -> String {
        self.inner.elapsed_label()
    }

    #[wasm_bindgen(js_name = durationLabel)]
    pub fn duration_label(&self) -> String {
        self.inner.duration_label()
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_js_value<T: serde::Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}
