//! End-to-end tests for PlaybackController
//!
//! Covers the request/playback flow as the presentation layer drives it:
//! - Serving requests in order
//! - Play-now and replays
//! - Auto-advance when a song ends
//! - Playback failures and stale device answers
//! - Change events


use std::time::Duration;
use test_helpers::*;
use tunequeue_playback::{DeviceEvent, PlaybackError, PlaybackEvent, TransportStatus};

// ============================================================================
// Serving requests
// ============================================================================

#[test]
fn test_serve_next_plays_requests_in_order() {
    let mut controller = controller_with(two_song_catalog());

    controller.enqueue_by_id(&id("S1")).unwrap();
    controller.enqueue_by_id(&id("S2")).unwrap();

    controller.serve_next().unwrap();
    assert_eq!(controller.now_playing().unwrap().id, id("S1"));
    assert_eq!(ids(&controller.queue_snapshot()), vec!["S2"]);
    assert_eq!(ids(&controller.history_snapshot()), vec!["S1"]);
    assert_eq!(controller.stats().artist_count("A"), 1);
    assert_eq!(controller.stats().genre_count("Lo-fi"), 1);

    controller.serve_next().unwrap();
    assert_eq!(controller.now_playing().unwrap().id, id("S2"));
    assert!(controller.queue_snapshot().is_empty());
    assert_eq!(ids(&controller.history_snapshot()), vec!["S2", "S1"]);

    let ranking = controller.artist_ranking();
    assert_eq!(ranking.len(), 2);
    assert!(ranking.iter().all(|entry| entry.plays == 1));
    assert_eq!(ranking[0].artist, "A");
    assert_eq!(ranking[1].artist, "B");
}

#[test]
fn test_serve_next_on_empty_queue_changes_nothing() {
    let mut controller = controller_with(two_song_catalog());
    let events = record_events(&mut controller);

    let err = controller.serve_next().unwrap_err();

    assert_eq!(err, PlaybackError::EmptyQueue);
    assert_eq!(controller.status(), TransportStatus::Idle);
    assert!(controller.now_playing().is_none());
    assert_eq!(controller.history_len(), 0);
    assert!(controller.stats().is_empty());
    assert!(controller.device().attempts.is_empty());

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], PlaybackEvent::Notice { .. }));
}

#[test]
fn test_enqueue_does_not_count_as_play() {
    let mut controller = controller_with(demo_catalog());

    controller.enqueue_by_id(&id("1")).unwrap();
    controller.enqueue_by_id(&id("1")).unwrap();
    assert!(controller.enqueue_selected());

    assert_eq!(controller.queue_len(), 3);
    assert_eq!(controller.history_len(), 0);
    assert!(controller.stats().is_empty());
    assert_eq!(controller.status(), TransportStatus::Idle);
    assert_eq!(controller.peek_next().unwrap().id, id("1"));
}

#[test]
fn test_enqueue_unknown_song() {
    let mut controller = controller_with(demo_catalog());

    let err = controller.enqueue_by_id(&id("99")).unwrap_err();
    assert_eq!(err, PlaybackError::SongNotFound(id("99")));
    assert_eq!(controller.queue_len(), 0);
}

#[test]
fn test_clear_queue() {
    let mut controller = controller_with(demo_catalog());
    controller.enqueue_by_id(&id("2")).unwrap();
    controller.enqueue_by_id(&id("3")).unwrap();

    controller.clear_queue();

    assert_eq!(controller.queue_len(), 0);
    assert_eq!(controller.serve_next(), Err(PlaybackError::EmptyQueue));
}

// ============================================================================
// Play-now and replays
// ============================================================================

#[test]
fn test_play_now_bypasses_queue() {
    let mut controller = controller_with(demo_catalog());
    controller.enqueue_by_id(&id("2")).unwrap();

    controller.play_now(&id("5")).unwrap();

    assert_eq!(controller.now_playing().unwrap().title, "Binary Dreams");
    assert_eq!(ids(&controller.queue_snapshot()), vec!["2"]);
}

#[test]
fn test_replay_pushes_second_history_entry() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("1")).unwrap();
    controller.play_now(&id("4")).unwrap();

    // click on the recent-play item for song 1
    controller.play_now(&id("1")).unwrap();

    assert_eq!(controller.history_len(), 3);
    assert_eq!(ids(&controller.history_snapshot()), vec!["1", "4", "1"]);
    assert_eq!(controller.stats().artist_count("Luna Waves"), 2);
    assert_eq!(controller.current_artist_plays(), 2);
}

#[test]
fn test_every_play_path_counts() {
    let mut controller = controller_with(demo_catalog());

    controller.enqueue_by_id(&id("1")).unwrap();
    controller.serve_next().unwrap(); // served
    controller.play_now(&id("7")).unwrap(); // play now
    controller.select(&id("1")).unwrap();
    assert!(controller.play_selected()); // selected

    assert_eq!(controller.stats().artist_count("Luna Waves"), 3);
    assert_eq!(controller.stats().genre_count("Lo-fi"), 3);
    assert_eq!(controller.stats().total_plays(), 3);
}

#[test]
fn test_clear_history_keeps_stats() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("6")).unwrap();

    controller.clear_history();

    assert_eq!(controller.history_len(), 0);
    assert_eq!(controller.stats().genre_count("Blues"), 1);
}

// ============================================================================
// End of track
// ============================================================================

#[test]
fn test_ended_with_empty_queue_goes_idle() {
    let mut controller = controller_with(two_song_catalog());
    let events = record_events(&mut controller);

    controller.play_now(&id("S1")).unwrap();
    resolve_ok(&mut controller);
    let attempts_before = controller.device().attempts.len();

    controller.handle_device_event(DeviceEvent::Ended);

    assert_eq!(controller.status(), TransportStatus::Idle);
    assert_eq!(controller.device().attempts.len(), attempts_before);
    assert_eq!(controller.history_len(), 1);

    let events = events.borrow();
    assert!(!events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Error { .. } | PlaybackEvent::Notice { .. })));
}

#[test]
fn test_ended_auto_advances_queue() {
    let mut controller = controller_with(two_song_catalog());
    controller.play_now(&id("S1")).unwrap();
    resolve_ok(&mut controller);
    controller.enqueue_by_id(&id("S2")).unwrap();

    controller.handle_device_event(DeviceEvent::Ended);

    assert_eq!(controller.now_playing().unwrap().id, id("S2"));
    assert_eq!(controller.status(), TransportStatus::Loading);
    assert_eq!(controller.queue_len(), 0);

    resolve_ok(&mut controller);
    assert_eq!(controller.status(), TransportStatus::Playing);
    assert_eq!(ids(&controller.history_snapshot()), vec!["S2", "S1"]);
}

#[test]
fn test_toggle_after_end_restarts_current_song() {
    let mut controller = controller_with(two_song_catalog());
    controller.play_now(&id("S2")).unwrap();
    resolve_ok(&mut controller);
    controller.handle_device_event(DeviceEvent::Ended);

    controller.toggle_play();

    assert_eq!(controller.status(), TransportStatus::Loading);
    assert_eq!(controller.now_playing().unwrap().id, id("S2"));
    assert_eq!(controller.device().positions.last(), Some(&Duration::ZERO));
    // resuming is not a new play
    assert_eq!(controller.history_len(), 1);
}

#[test]
fn test_ended_without_song_is_ignored() {
    let mut controller = controller_with(two_song_catalog());
    controller.enqueue_by_id(&id("S1")).unwrap();

    controller.handle_device_event(DeviceEvent::Ended);

    assert_eq!(controller.status(), TransportStatus::Idle);
    assert_eq!(controller.queue_len(), 1);
}

// ============================================================================
// Failures and async resolution
// ============================================================================

#[test]
fn test_failed_play_still_counts() {
    let mut controller = controller_with(demo_catalog());
    let events = record_events(&mut controller);

    controller.play_now(&id("2")).unwrap();
    resolve_err(&mut controller, "NotAllowedError");

    assert_eq!(controller.status(), TransportStatus::Paused);
    assert!(!controller.is_playing());
    assert!(!controller.is_pending());
    assert_eq!(controller.history_len(), 1);
    assert_eq!(controller.stats().artist_count("Pulse City"), 1);

    let events = events.borrow();
    let error = events.iter().find_map(|e| match e {
        PlaybackEvent::Error { message } => Some(message.clone()),
        _ => None,
    });
    assert_eq!(error.as_deref(), Some("Playback failed: NotAllowedError"));
}

#[test]
fn test_failed_resume_stays_paused() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("3")).unwrap();
    resolve_ok(&mut controller);
    controller.toggle_play();
    assert_eq!(controller.status(), TransportStatus::Paused);

    controller.toggle_play();
    resolve_err(&mut controller, "device busy");

    assert_eq!(controller.status(), TransportStatus::Paused);
    assert_eq!(controller.now_playing().unwrap().id, id("3"));
}

#[test]
fn test_slow_resolution_for_replaced_song_is_discarded() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("1")).unwrap();
    let slow = last_attempt(&controller);

    controller.play_now(&id("2")).unwrap();
    resolve_ok(&mut controller);
    assert_eq!(controller.status(), TransportStatus::Playing);

    // the first song's promise finally rejects
    controller.handle_device_event(DeviceEvent::resolved_err(slow, "aborted"));

    assert_eq!(controller.status(), TransportStatus::Playing);
    assert_eq!(controller.now_playing().unwrap().id, id("2"));
}

#[test]
fn test_resolution_after_stop_is_discarded() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("1")).unwrap();
    let attempt = last_attempt(&controller);

    controller.stop();
    controller.handle_device_event(DeviceEvent::resolved_ok(attempt));

    assert_eq!(controller.status(), TransportStatus::Stopped);
}

#[test]
fn test_resuming_song_without_audio_fails_again() {
    let catalog = tunequeue_core::Catalog::new(vec![
        song("1", "A", "Lo-fi"),
        tunequeue_core::Song::new("3", "Silent", "Nobody", "Ambient", ""),
    ])
    .unwrap();
    let mut controller = controller_with(catalog);
    let events = record_events(&mut controller);

    controller.play_now(&id("1")).unwrap();
    resolve_ok(&mut controller);
    controller.play_now(&id("3")).unwrap();
    assert_eq!(controller.status(), TransportStatus::Paused);
    let attempts_before = controller.device().attempts.len();

    controller.toggle_play();

    // the device still has song 1 loaded and must not be restarted
    assert_eq!(controller.status(), TransportStatus::Paused);
    assert!(!controller.is_pending());
    assert_eq!(controller.device().attempts.len(), attempts_before);
    assert_eq!(controller.now_playing().unwrap().title, "Silent");

    let errors = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::Error { .. }))
        .count();
    assert_eq!(errors, 2);
}

#[test]
fn test_device_error_while_playing_pauses() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("8")).unwrap();
    resolve_ok(&mut controller);

    controller.handle_device_event(DeviceEvent::PlaybackError {
        message: "decode error".to_string(),
    });

    assert_eq!(controller.status(), TransportStatus::Paused);
}

#[test]
fn test_device_error_during_attempt_resolves_it() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("8")).unwrap();

    controller.handle_device_event(DeviceEvent::PlaybackError {
        message: "unsupported codec".to_string(),
    });

    assert_eq!(controller.status(), TransportStatus::Paused);
    assert!(!controller.is_pending());
}

// ============================================================================
// Transport
// ============================================================================

#[test]
fn test_progress_and_labels_follow_device() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("4")).unwrap();
    resolve_ok(&mut controller);

    assert_eq!(controller.duration_label(), "0:00");
    assert_eq!(controller.progress(), 0.0);

    controller.handle_device_event(DeviceEvent::MetadataLoaded {
        duration: Duration::from_secs(240),
    });
    controller.handle_device_event(DeviceEvent::TimeProgress {
        position: Duration::from_secs(60),
    });

    assert_eq!(controller.elapsed_label(), "1:00");
    assert_eq!(controller.duration_label(), "4:00");
    assert_eq!(controller.progress(), 0.25);
}

#[test]
fn test_new_song_forgets_previous_duration() {
    let mut controller = controller_with(demo_catalog());
    controller.play_now(&id("4")).unwrap();
    controller.handle_device_event(DeviceEvent::MetadataLoaded {
        duration: Duration::from_secs(240),
    });

    controller.play_now(&id("5")).unwrap();

    assert_eq!(controller.duration(), None);
    assert_eq!(controller.seek(0.5), Err(PlaybackError::DurationUnknown));
}

#[test]
fn test_stop_without_song_keeps_idle() {
    let mut controller = controller_with(demo_catalog());
    controller.stop();

    assert_eq!(controller.status(), TransportStatus::Idle);
    assert_eq!(controller.device().pauses, 1);
}

#[test]
fn test_toggle_with_nothing_loaded_plays_selection() {
    let mut controller = controller_with(demo_catalog());
    controller.select(&id("6")).unwrap();

    controller.toggle_play();

    assert_eq!(controller.now_playing().unwrap().title, "Blues in C");
    assert_eq!(
        controller.device().loaded.last().unwrap().as_str(),
        "audio/blues-in-c.mp3"
    );
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_play_emits_now_playing_history_and_stats() {
    let mut controller = controller_with(two_song_catalog());
    controller.enqueue_by_id(&id("S1")).unwrap();
    let events = record_events(&mut controller);

    controller.serve_next().unwrap();

    let events = events.borrow();
    assert!(matches!(&events[0], PlaybackEvent::QueueChanged { songs } if songs.is_empty()));
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::StateChanged {
            status: TransportStatus::Loading
        }
    )));
    assert!(events.iter().any(
        |e| matches!(e, PlaybackEvent::NowPlayingChanged { song, artist_plays: 1 } if song.id.as_str() == "S1")
    ));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::HistoryChanged { songs } if songs.len() == 1)));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::StatsChanged { stats } if stats.genres.is_some())));
}

#[test]
fn test_unsubscribed_listener_gets_nothing() {
    let mut controller = controller_with(two_song_catalog());
    let events = std::rc::Rc::new(std::cell::RefCell::new(0usize));
    let counter = std::rc::Rc::clone(&events);
    let subscription =
        controller.subscribe(move |_: &PlaybackEvent| *counter.borrow_mut() += 1);

    controller.enqueue_by_id(&id("S1")).unwrap();
    assert!(controller.unsubscribe(subscription));
    controller.enqueue_by_id(&id("S2")).unwrap();

    assert_eq!(*events.borrow(), 1);
}
