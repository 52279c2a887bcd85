/// Console configuration
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tunequeue_core::{Catalog, Song};
use tunequeue_playback::PlaybackConfig;

/// Built-in defaults, including the demo song library
const DEFAULT_CONFIG: &str = include_str!("../catalog.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_device")]
    pub device: DeviceSettings,

    #[serde(default)]
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Length of every simulated track
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: u64,

    /// Reject every play attempt, like a browser blocking autoplay
    #[serde(default)]
    pub fail_playback: bool,
}

impl DeviceSettings {
    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.track_length_secs)
    }
}

impl ConsoleConfig {
    /// Load configuration
    ///
    /// Sources, lowest priority first: built-in defaults, the optional config
    /// file, then `TUNEQUEUE_*` environment variables (`__` separates nested
    /// keys, e.g. `TUNEQUEUE_DEVICE__TRACK_LENGTH_SECS=60`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNEQUEUE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Built-in defaults only
    pub fn builtin() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.songs.is_empty() {
            return Err(ConsoleError::Config(
                "song library is empty (add [[songs]] entries)".to_string(),
            ));
        }

        if self.device.track_length_secs == 0 {
            return Err(ConsoleError::Config(
                "device.track_length_secs must be at least 1".to_string(),
            ));
        }

        if self.playback.history_limit == Some(0) {
            return Err(ConsoleError::Config(
                "playback.history_limit must be at least 1 (omit it for no limit)".to_string(),
            ));
        }

        let height = self.playback.chart_max_height;
        if !height.is_finite() || height <= 0.0 {
            return Err(ConsoleError::Config(format!(
                "playback.chart_max_height must be positive, got {}",
                height
            )));
        }

        self.catalog()?;
        Ok(())
    }

    /// Build the catalog, rejecting duplicate ids
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.songs.clone())?)
    }
}

// Default values
fn default_device() -> DeviceSettings {
    DeviceSettings {
        track_length_secs: default_track_length_secs(),
        fail_playback: false,
    }
}

fn default_track_length_secs() -> u64 {
    180
}
