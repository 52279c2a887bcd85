//! Interactive session
//!
//! Owns the playback controller and the simulated device. Each command is
//! applied, pending device notifications are fed back into the controller,
//! then every event emitted along the way is rendered.

use serde::Serialize;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use tracing::{debug, info, warn};
use tunequeue_core::Song;
use tunequeue_playback::{
    as_millis_u64, PlaybackController, PlaybackError, PlaybackEvent, StatsSnapshot,
    TransportStatus,
};

use crate::{
    command::{Command, HELP},
    config::ConsoleConfig,
    device::SimulatedDevice,
    error::{ConsoleError, Result},
    render,
};

/// Whether the session keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Machine-readable player state (`dump`)
#[derive(Debug, Serialize)]
pub struct StateDump<'a> {
    pub status: TransportStatus,
    pub now_playing: Option<&'a Song>,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub queue: Vec<Song>,
    pub recent: Vec<Song>,
    pub stats: StatsSnapshot,
}

impl<'a> StateDump<'a> {
    pub fn capture(controller: &'a PlaybackController<SimulatedDevice>) -> Self {
        Self {
            status: controller.status(),
            now_playing: controller.now_playing(),
            position_ms: as_millis_u64(controller.position()),
            duration_ms: controller.duration().map(as_millis_u64),
            queue: controller.queue_snapshot(),
            recent: controller.history_snapshot(),
            stats: controller.stats().snapshot(),
        }
    }
}

pub struct Session {
    controller: PlaybackController<SimulatedDevice>,
    events: Rc<RefCell<Vec<PlaybackEvent>>>,
}

impl Session {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        let device = SimulatedDevice::new(config.device.track_length(), config.device.fail_playback);
        let mut controller = PlaybackController::new(catalog, device, config.playback.clone());

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.subscribe(move |event: &PlaybackEvent| sink.borrow_mut().push(event.clone()));

        info!(songs = controller.catalog().len(), "session ready");
        Ok(Self { controller, events })
    }

    pub fn controller(&self) -> &PlaybackController<SimulatedDevice> {
        &self.controller
    }

    /// Read and execute commands until `quit` or end of input
    ///
    /// Bad commands and rejected operations are reported and skipped; only
    /// output failures end the session early.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let outcome = line
                .parse::<Command>()
                .and_then(|command| self.execute(command, out));

            match outcome {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                // already announced through a notice
                Err(ConsoleError::Playback(PlaybackError::EmptyQueue)) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(%line, error = %err, "command failed");
                    writeln!(out, "error: {}", err)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Apply one command and render what it caused
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        debug!(?command, "execute");
        let result = self.apply(command, out);
        self.pump_device();
        self.flush_events(out)?;
        result
    }

    fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Songs => render::write_song_list(out, &self.controller)?,
            Command::Select(id) => self.controller.select(&id)?,
            Command::Add(Some(id)) => self.controller.enqueue_by_id(&id)?,
            Command::Add(None) => {
                if !self.controller.enqueue_selected() {
                    writeln!(out, "nothing selected")?;
                }
            }
            Command::Play(Some(id)) => self.controller.play_now(&id)?,
            Command::Play(None) => {
                if !self.controller.play_selected() {
                    writeln!(out, "nothing selected")?;
                }
            }
            Command::Next => self.controller.serve_next()?,
            Command::Clear => self.controller.clear_queue(),
            Command::ClearHistory => self.controller.clear_history(),
            Command::Toggle => self.controller.toggle_play(),
            Command::Stop => self.controller.stop(),
            Command::Seek(percent) => self.controller.seek(percent / 100.0)?,
            Command::Tick(elapsed) => self.controller.device_mut().advance(elapsed),
            Command::End => self.controller.device_mut().finish(),
            Command::Fail(message) => self.controller.device_mut().fail(message),
            Command::Show => render::write_overview(out, &self.controller)?,
            Command::Dump => {
                let dump = StateDump::capture(&self.controller);
                writeln!(out, "{}", serde_json::to_string_pretty(&dump)?)?;
            }
            Command::Help => out.write_all(HELP.as_bytes())?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Deliver device notifications until the device goes quiet
    ///
    /// Handling one notification can trigger more (an `Ended` starts the next
    /// request, which loads and plays again).
    fn pump_device(&mut self) {
        loop {
            let pending = self.controller.device_mut().take_events();
            if pending.is_empty() {
                break;
            }
            for event in pending {
                self.controller.handle_device_event(event);
            }
        }
    }

    fn flush_events(&mut self, out: &mut impl Write) -> Result<()> {
        let events: Vec<PlaybackEvent> = self.events.borrow_mut().drain(..).collect();
        for line in events.iter().filter_map(render::event_line) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
