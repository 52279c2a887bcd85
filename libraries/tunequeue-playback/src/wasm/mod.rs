//! WASM bindings for tunequeue-playback
//!
//! Lets the controller run in the browser, with an HTML audio element as the
//! audio device and the page as the presentation layer.

pub mod device;
pub mod manager;

pub use device::JsAudioDevice;
pub use manager::WasmPlaybackController;
