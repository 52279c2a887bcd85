//! Playback controller - core orchestration
//!
//! Coordinates the request queue, recent plays and play statistics, drives
//! the audio device and turns device notifications into state transitions.

use std::time::Duration;
use tracing::{debug, info, warn};
use tunequeue_core::{Catalog, Song, SongId};

use crate::{
    device::{AudioDevice, DeviceEvent},
    error::{PlaybackError, Result},
    events::{EventBus, Listener, PlaybackEvent, SubscriptionId},
    history::RecentPlays,
    queue::RequestQueue,
    stats::{ArtistCount, GenreHistogram, PlayStats},
    time::{as_millis_u64, format_time},
    types::{AttemptId, PlayAttempt, PlaybackConfig, TransportStatus},
};

/// Shown when serve-next finds nothing to serve
const EMPTY_QUEUE_NOTICE: &str = "Queue is empty! Add some song requests first.";

/// Central playback management
///
/// One instance per session. It is the only writer of the queue, the recent
/// plays and the statistics; the presentation layer reads snapshots and
/// forwards user intents through the methods below.
///
/// Play and resume are asynchronous on the device side. Every attempt gets a
/// fresh `AttemptId`; a resolution that does not match the attempt still
/// pending is stale and dropped, so a slow answer for an old song can never
/// flip the transport state of the current one.
pub struct PlaybackController<D: AudioDevice> {
    catalog: Catalog,
    device: D,
    config: PlaybackConfig,

    // State
    status: TransportStatus,
    current: Option<Song>,
    selected: Option<SongId>,
    position: Duration,
    duration: Option<Duration>,
    pending: Option<PlayAttempt>,
    next_attempt: u64,

    // Queue, history and statistics
    queue: RequestQueue,
    history: RecentPlays,
    stats: PlayStats,

    events: EventBus,
}

impl<D: AudioDevice> PlaybackController<D> {
    /// Create a controller over a fixed catalog
    ///
    /// The first catalog entry starts out selected.
    pub fn new(catalog: Catalog, device: D, config: PlaybackConfig) -> Self {
        let selected = catalog.first().map(|song| song.id.clone());

        Self {
            catalog,
            device,
            status: TransportStatus::Idle,
            current: None,
            selected,
            position: Duration::ZERO,
            duration: None,
            pending: None,
            next_attempt: 0,
            queue: RequestQueue::new(),
            history: RecentPlays::with_limit(config.history_limit),
            stats: PlayStats::new(),
            events: EventBus::new(),
            config,
        }
    }

    // ===== Subscriptions =====

    /// Register a listener for every subsequent event
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent) + 'static) -> SubscriptionId {
        let listener: Listener = Box::new(listener);
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ===== Selection =====

    /// Select a catalog entry
    ///
    /// An unknown id leaves the current selection untouched.
    pub fn select(&mut self, id: &SongId) -> Result<()> {
        let song = self.lookup(id)?;
        self.selected = Some(song.id.clone());
        self.emit(PlaybackEvent::SelectionChanged { song });
        Ok(())
    }

    pub fn selected(&self) -> Option<&Song> {
        self.selected
            .as_ref()
            .and_then(|id| self.catalog.get(id).ok())
    }

    // ===== Queue Management =====

    /// Add a request to the back of the queue
    ///
    /// Enqueueing never touches the recent plays or the statistics.
    pub fn enqueue(&mut self, song: Song) {
        debug!(song = %song.id, "enqueue");
        self.queue.enqueue(song);
        self.emit_queue_changed();
    }

    pub fn enqueue_by_id(&mut self, id: &SongId) -> Result<()> {
        let song = self.lookup(id)?;
        self.enqueue(song);
        Ok(())
    }

    /// Enqueue the selected song; false if nothing is selected
    pub fn enqueue_selected(&mut self) -> bool {
        match self.selected().cloned() {
            Some(song) => {
                self.enqueue(song);
                true
            }
            None => false,
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Next request to be served, without serving it
    pub fn peek_next(&self) -> Result<&Song> {
        self.queue.peek()
    }

    /// Serve the front request
    ///
    /// With nothing pending this returns `EmptyQueue`, emits a notice for the
    /// user and changes nothing else.
    pub fn serve_next(&mut self) -> Result<()> {
        match self.queue.dequeue() {
            Ok(song) => {
                self.emit_queue_changed();
                self.play_song(song);
                Ok(())
            }
            Err(err) => {
                debug!("serve next on empty queue");
                self.emit(PlaybackEvent::Notice {
                    message: EMPTY_QUEUE_NOTICE.to_string(),
                });
                Err(err)
            }
        }
    }

    // ===== History =====

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.emit(PlaybackEvent::HistoryChanged { songs: Vec::new() });
    }

    // ===== Playback Control =====

    /// Play a catalog song right away, bypassing the queue
    ///
    /// Used for play-now as well as clicks on queue or history items.
    pub fn play_now(&mut self, id: &SongId) -> Result<()> {
        let song = self.lookup(id)?;
        self.play_song(song);
        Ok(())
    }

    /// Play the selected song; false if nothing is selected
    pub fn play_selected(&mut self) -> bool {
        match self.selected().cloned() {
            Some(song) => {
                self.play_song(song);
                true
            }
            None => false,
        }
    }

    /// Make `song` current and start playing it
    ///
    /// The song counts as played (history and statistics) as soon as it is
    /// requested, whether or not the device later manages to play it.
    pub fn play_song(&mut self, song: Song) {
        info!(song = %song.id, title = %song.title, "play");

        self.current = Some(song.clone());
        self.position = Duration::ZERO;
        self.duration = None;

        if song.audio.as_str().is_empty() {
            self.pending = None;
            self.device.pause();
            self.fail_playback(format!("no audio resource for {}", song.title));
        } else {
            self.device.load(&song.audio);
            self.start_attempt(song.id.clone());
        }

        self.history.push(song.clone());
        self.stats.record_play(&song);

        let artist_plays = self.stats.artist_count(&song.artist);
        self.emit(PlaybackEvent::NowPlayingChanged { song, artist_plays });
        self.emit(PlaybackEvent::HistoryChanged {
            songs: self.history.snapshot(),
        });
        self.emit(PlaybackEvent::StatsChanged {
            stats: self.stats.snapshot(),
        });
    }

    /// Play/pause button
    ///
    /// - nothing loaded yet: play the selected song
    /// - playing: pause
    /// - loading: cancel the pending attempt and pause
    /// - paused, stopped or finished: resume the current song
    pub fn toggle_play(&mut self) {
        match self.status {
            TransportStatus::Playing => {
                self.device.pause();
                self.set_status(TransportStatus::Paused);
            }
            TransportStatus::Loading => {
                debug!("pause while loading, dropping pending attempt");
                self.pending = None;
                self.device.pause();
                self.set_status(TransportStatus::Paused);
            }
            TransportStatus::Idle if self.current.is_none() => {
                self.play_selected();
            }
            TransportStatus::Idle | TransportStatus::Paused | TransportStatus::Stopped => {
                self.resume();
            }
        }
    }

    /// Pause and rewind to the start, keeping the current song
    pub fn stop(&mut self) {
        self.pending = None;
        self.device.pause();
        self.device.set_position(Duration::ZERO);
        self.position = Duration::ZERO;

        if self.current.is_some() {
            self.set_status(TransportStatus::Stopped);
            self.emit_position();
        }
    }

    /// Jump to `fraction` (0.0 - 1.0) of the current song
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        if !fraction.is_finite() {
            return Err(PlaybackError::InvalidSeek(fraction));
        }

        let duration = match self.duration {
            Some(duration) if !duration.is_zero() => duration,
            _ => return Err(PlaybackError::DurationUnknown),
        };

        let position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        debug!(?position, "seek");
        self.device.set_position(position);
        self.position = position;
        self.emit_position();
        Ok(())
    }

    // ===== Device Notifications =====

    /// Feed a notification from the audio device into the state machine
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::TimeProgress { position } => {
                self.position = position;
                if self.duration.is_some() {
                    self.emit_position();
                }
            }
            DeviceEvent::MetadataLoaded { duration } => {
                self.duration = Some(duration);
                self.emit(PlaybackEvent::DurationChanged {
                    duration_ms: as_millis_u64(duration),
                });
            }
            DeviceEvent::Ended => self.on_playback_ended(),
            DeviceEvent::PlaybackError { message } => {
                if self.pending.take().is_some() || self.status.is_playing() {
                    self.fail_playback(message);
                } else {
                    warn!(%message, "device error while not playing");
                    self.emit(PlaybackEvent::Error {
                        message: PlaybackError::PlaybackFailure(message).to_string(),
                    });
                }
            }
            DeviceEvent::PlayResolved { attempt, outcome } => self.resolve_attempt(attempt, outcome),
        }
    }

    /// Current song reached its end: go idle, then serve the next request
    ///
    /// Running out of requests is normal and raises nothing.
    pub fn on_playback_ended(&mut self) {
        if self.current.is_none() {
            debug!("ended with nothing loaded, ignoring");
            return;
        }

        self.pending = None;
        self.set_status(TransportStatus::Idle);

        match self.queue.dequeue() {
            Ok(song) => {
                self.emit_queue_changed();
                self.play_song(song);
            }
            Err(_) => debug!("queue drained, staying idle"),
        }
    }

    // ===== State Queries =====

    pub fn status(&self) -> TransportStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    /// A play or resume attempt is waiting on the device
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn now_playing(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    /// Whether `id` is the current song (for list highlighting)
    pub fn is_current(&self, id: &SongId) -> bool {
        self.current.as_ref().is_some_and(|song| &song.id == id)
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// `None` until the device has reported metadata
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Scrub bar position in 0.0 - 1.0
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.position)
    }

    pub fn duration_label(&self) -> String {
        self.duration.map_or_else(|| "0:00".to_string(), format_time)
    }

    /// Plays recorded for the current song's artist
    pub fn current_artist_plays(&self) -> u32 {
        self.current
            .as_ref()
            .map_or(0, |song| self.stats.artist_count(&song.artist))
    }

    pub fn queue_snapshot(&self) -> Vec<Song> {
        self.queue.snapshot()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Recent plays, most recent first
    pub fn history_snapshot(&self) -> Vec<Song> {
        self.history.snapshot()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn artist_ranking(&self) -> Vec<ArtistCount> {
        self.stats.artist_ranking()
    }

    pub fn genre_histogram(&self) -> Option<GenreHistogram> {
        self.stats.genre_histogram()
    }

    pub fn stats(&self) -> &PlayStats {
        &self.stats
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    // ===== Internal =====

    fn lookup(&self, id: &SongId) -> Result<Song> {
        self.catalog.get(id).cloned().map_err(|err| {
            debug!(%id, "unknown song id");
            PlaybackError::from(err)
        })
    }

    /// Resume the current song
    fn resume(&mut self) {
        let Some(song) = self.current.clone() else {
            return;
        };

        // the device still holds the previous resource
        if song.audio.as_str().is_empty() {
            self.pending = None;
            self.fail_playback(format!("no audio resource for {}", song.title));
            return;
        }

        if self.status == TransportStatus::Idle {
            // finished track restarts from the top
            self.position = Duration::ZERO;
            self.device.set_position(Duration::ZERO);
        }
        self.start_attempt(song.id);
    }

    fn start_attempt(&mut self, song_id: SongId) {
        let attempt = PlayAttempt {
            id: AttemptId::new(self.next_attempt),
            song_id,
        };
        self.next_attempt += 1;

        debug!(attempt = %attempt.id, song = %attempt.song_id, "play attempt");
        self.pending = Some(attempt.clone());
        self.set_status(TransportStatus::Loading);
        self.device.play(attempt);
    }

    fn resolve_attempt(&mut self, attempt: AttemptId, outcome: std::result::Result<(), String>) {
        let is_pending = self.pending.as_ref().is_some_and(|pending| {
            pending.id == attempt && self.is_current(&pending.song_id)
        });
        if !is_pending {
            debug!(%attempt, "discarding stale play resolution");
            return;
        }
        self.pending = None;

        match outcome {
            Ok(()) => self.set_status(TransportStatus::Playing),
            Err(message) => self.fail_playback(message),
        }
    }

    fn fail_playback(&mut self, message: String) {
        warn!(%message, "playback failed");
        self.set_status(TransportStatus::Paused);
        self.emit(PlaybackEvent::Error {
            message: PlaybackError::PlaybackFailure(message).to_string(),
        });
    }

    fn set_status(&mut self, status: TransportStatus) {
        if self.status != status {
            debug!(from = %self.status, to = %status, "transport");
            self.status = status;
            self.emit(PlaybackEvent::StateChanged { status });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            songs: self.queue.snapshot(),
        });
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: as_millis_u64(self.position),
            duration_ms: self.duration.map(as_millis_u64),
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.events.emit(&event);
    }
}

impl<D: AudioDevice + Default> PlaybackController<D> {
    /// Controller over `catalog` with a default device and configuration
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(catalog, D::default(), PlaybackConfig::default())
    }
}
