//! Transport controls, uploads, location signals and the extraction workflow

use std::time::{Duration, Instant};

use super::common::fixtures::{press, quiet_config, test_app, type_text};
use crossterm::event::KeyCode;
use drivelab::core::{ExtractionStage, TaskStatus};
use drivelab::services::PlaybackState;
use drivelab::ui::{FeatureView, InputMode};
use drivelab::Config;

fn playback(app: &drivelab::App, tab: &str) -> PlaybackState {
    app.workspace()
        .tabs()
        .get(tab)
        .and_then(|tab| tab.content.player())
        .map(|player| player.playback())
        .unwrap_or_default()
}

#[test]
fn test_transport_keys_drive_only_active_tab() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Drive Lab");
    app.navigate("Critical Event Sieve");
    app.navigate("Drive Lab");

    press(&mut app, KeyCode::Char('p'), now);
    assert_eq!(playback(&app, "Drive Lab"), PlaybackState::Playing);
    assert_eq!(playback(&app, "Critical Event Sieve"), PlaybackState::Stopped);
    assert!(app.status().is_playing);

    press(&mut app, KeyCode::Char(' '), now);
    assert_eq!(playback(&app, "Drive Lab"), PlaybackState::Paused);
    assert!(!app.status().is_playing);

    press(&mut app, KeyCode::Char('r'), now);
    assert_eq!(playback(&app, "Drive Lab"), PlaybackState::Playing);
    press(&mut app, KeyCode::Char('s'), now);
    assert_eq!(playback(&app, "Drive Lab"), PlaybackState::Stopped);
}

#[test]
fn test_media_advances_with_ticks() {
    let mut app = test_app(quiet_config());
    let start = Instant::now();
    app.navigate("Drive Lab");
    app.tick(start);

    press(&mut app, KeyCode::Char('p'), start);
    app.tick(start + Duration::from_secs(5));

    let position = app
        .workspace()
        .active_content()
        .and_then(FeatureView::player)
        .map(|player| player.position())
        .unwrap_or_default();
    assert_eq!(position, Duration::from_secs(5));
}

#[test]
fn test_upload_enables_content_and_playback() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Critical Event Sieve");
    assert!(!app.status().has_content);

    // Nothing loaded yet
    press(&mut app, KeyCode::Char('p'), now);
    assert!(!app.is_video_playing());

    press(&mut app, KeyCode::Char('u'), now);
    assert_eq!(app.uploaded_video_count(), 1);
    assert!(app.status().has_content);

    press(&mut app, KeyCode::Char('p'), now);
    assert!(app.is_video_playing());
}

#[test]
fn test_upload_ignored_outside_sieve() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Drive Lab");
    press(&mut app, KeyCode::Char('u'), now);
    assert_eq!(app.uploaded_video_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_location_search_sets_status_flags() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Scene Generation");

    press(&mut app, KeyCode::Char('/'), now);
    assert_eq!(app.input_mode(), InputMode::Searching);
    type_text(&mut app, "Munich", now);

    // Past the geocoding debounce
    tokio::time::sleep(Duration::from_secs(1)).await;
    app.drain_events(now);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.input_mode(), InputMode::Normal);
    let status = app.status();
    assert!(status.has_location);
    assert!(!status.has_tile);
    assert_eq!(
        status.current_task,
        "Location selected: Munich, Bavaria, Germany"
    );
    // Map content needs both a location and a tile
    assert!(!status.has_content);

    press(&mut app, KeyCode::Char('t'), now);
    let status = app.status();
    assert!(status.has_tile);
    assert_eq!(status.current_task, "Tile selected: 16/34876/22744");
    assert!(status.has_content);

    press(&mut app, KeyCode::Char('x'), now);
    let status = app.status();
    assert!(!status.has_location);
    assert!(!status.has_tile);
    assert!(!status.has_content);
}

#[tokio::test(start_paused = true)]
async fn test_results_follow_their_panel() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Scene Generation");
    press(&mut app, KeyCode::Char('/'), now);
    type_text(&mut app, "Berlin", now);

    // Switch away before the lookup lands
    app.navigate("Scenario Generation");
    tokio::time::sleep(Duration::from_secs(1)).await;
    app.drain_events(now);

    let results = |app: &mut drivelab::App, tab: &str| {
        app.workspace_mut()
            .content_mut(tab)
            .and_then(FeatureView::as_location_mut)
            .map(|view| view.results().len())
            .unwrap_or_default()
    };
    assert_eq!(results(&mut app, "Scene Generation"), 1);
    assert_eq!(results(&mut app, "Scenario Generation"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_playback_starts_extraction_workflow() {
    let mut config = Config::default();
    config.tasks.auto_extract = true;
    let mut app = test_app(config);
    let now = Instant::now();
    app.navigate("Drive Lab");

    press(&mut app, KeyCode::Char('p'), now);
    app.tick(now);

    // Before the first progress tick
    tokio::time::sleep(Duration::from_millis(100)).await;
    app.drain_events(now);

    let tasks = app.workspace().tasks();
    assert_eq!(tasks.active_count(), 1);
    let current = tasks.current().expect("extraction task");
    assert_eq!(current.name, ExtractionStage::Extracting.task_name());
    assert_eq!(current.progress, 0);
}

#[tokio::test(start_paused = true)]
async fn test_extraction_not_restarted_while_running() {
    let mut app = test_app(Config::default());
    let now = Instant::now();
    app.navigate("Drive Lab");

    press(&mut app, KeyCode::Char('p'), now);
    app.tick(now);
    tokio::time::sleep(Duration::from_millis(100)).await;
    app.drain_events(now);

    // Pause and resume: a new rising edge while the first run is active
    press(&mut app, KeyCode::Char(' '), now);
    app.tick(now);
    press(&mut app, KeyCode::Char('p'), now);
    app.tick(now);
    tokio::time::sleep(Duration::from_millis(100)).await;
    app.drain_events(now);

    assert_eq!(app.workspace().tasks().tasks().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_quick_replay_leaves_no_stuck_tasks() {
    let mut app = test_app(Config::default());
    let now = Instant::now();
    app.navigate("Drive Lab");

    // Play, stop and play again before any simulator event is drained
    press(&mut app, KeyCode::Char('p'), now);
    app.tick(now);
    press(&mut app, KeyCode::Char('s'), now);
    app.tick(now);
    press(&mut app, KeyCode::Char('p'), now);
    app.tick(now);

    // Long enough for both stages to finish
    tokio::time::sleep(Duration::from_secs(120)).await;
    app.drain_events(now);

    let tasks = app.workspace().tasks();
    assert_eq!(tasks.active_count(), 0);
    assert_eq!(tasks.tasks().len(), 2);
    assert!(tasks
        .tasks()
        .iter()
        .all(|task| task.status == TaskStatus::Completed));
}
