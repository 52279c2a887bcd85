//! Text rendering of player state and change events

use std::io::Write;
use std::time::Duration;
use tunequeue_core::Song;
use tunequeue_playback::{
    format_time, AudioDevice, GenreHistogram, PlaybackController, PlaybackEvent,
};

use crate::error::Result;

/// Characters in the widest genre bar
const BAR_WIDTH: f32 = 24.0;

/// One line for an event, or `None` for events only `show` displays
pub fn event_line(event: &PlaybackEvent) -> Option<String> {
    let line = match event {
        PlaybackEvent::SelectionChanged { song } => format!("selected: {}", song.label()),
        PlaybackEvent::NowPlayingChanged { song, artist_plays } => format!(
            "now playing: {} | artist: {} (plays: {})",
            song.title, song.artist, artist_plays
        ),
        PlaybackEvent::StateChanged { status } => format!("[{}] {}", status.glyph(), status),
        PlaybackEvent::QueueChanged { songs } => format!("queue: {}", titles(songs)),
        PlaybackEvent::HistoryChanged { songs } => format!("recent: {}", titles(songs)),
        PlaybackEvent::PositionUpdate {
            position_ms,
            duration_ms,
        } => format!(
            "{} / {}",
            format_time(Duration::from_millis(*position_ms)),
            duration_ms.map_or_else(
                || "0:00".to_string(),
                |ms| format_time(Duration::from_millis(ms))
            )
        ),
        PlaybackEvent::Notice { message } => format!("! {}", message),
        PlaybackEvent::Error { message } => format!("error: {}", message),
        PlaybackEvent::StatsChanged { .. } | PlaybackEvent::DurationChanged { .. } => return None,
    };

    Some(line)
}

/// Comma separated titles, or `(empty)`
pub fn titles(songs: &[Song]) -> String {
    if songs.is_empty() {
        return "(empty)".to_string();
    }
    songs
        .iter()
        .map(|song| song.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Song library with selection (`>`) and now-playing (`*`) markers
pub fn write_song_list<D: AudioDevice>(
    out: &mut impl Write,
    controller: &PlaybackController<D>,
) -> Result<()> {
    let selected = controller.selected().map(|song| &song.id);

    for song in controller.catalog() {
        let playing = if controller.is_current(&song.id) { '*' } else { ' ' };
        let cursor = if selected == Some(&song.id) { '>' } else { ' ' };
        writeln!(out, "{}{} {:>3}  {}", cursor, playing, song.id, song.label())?;
    }

    Ok(())
}

/// Full player overview
pub fn write_overview<D: AudioDevice>(
    out: &mut impl Write,
    controller: &PlaybackController<D>,
) -> Result<()> {
    let status = controller.status();
    writeln!(
        out,
        "[{}] {}  {} / {}",
        status.glyph(),
        status,
        controller.elapsed_label(),
        controller.duration_label()
    )?;

    match controller.now_playing() {
        Some(song) => writeln!(
            out,
            "now playing: {} | artist: {} (plays: {})",
            song.label(),
            song.artist,
            controller.current_artist_plays()
        )?,
        None => writeln!(out, "now playing: -")?,
    }

    writeln!(out, "queue: {}", titles(&controller.queue_snapshot()))?;
    writeln!(out, "recent: {}", titles(&controller.history_snapshot()))?;

    writeln!(out, "top artists:")?;
    let ranking = controller.artist_ranking();
    if ranking.is_empty() {
        writeln!(out, "  no data yet")?;
    }
    for entry in ranking {
        writeln!(out, "  {:<16} {}", entry.artist, entry.plays)?;
    }

    writeln!(out, "genres:")?;
    match controller.genre_histogram() {
        Some(histogram) => {
            write_histogram(out, &histogram, controller.config().chart_max_height)?;
        }
        None => writeln!(out, "  no data yet")?,
    }

    Ok(())
}

/// Horizontal genre bars, tallest bar `BAR_WIDTH` characters wide
pub fn write_histogram(
    out: &mut impl Write,
    histogram: &GenreHistogram,
    chart_max_height: f32,
) -> Result<()> {
    for bar in &histogram.bars {
        let width = (bar.height * BAR_WIDTH).round().max(1.0) as usize;
        writeln!(
            out,
            "  {:<12} {:<24} {} ({:.0}px)",
            bar.genre,
            "#".repeat(width),
            bar.plays,
            bar.scaled_height(chart_max_height)
        )?;
    }
    Ok(())
}
