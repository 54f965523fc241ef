//! Rendering the whole shell into a TestBackend

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::fixtures::{press, quiet_config, test_app, RecordingChrome};
use super::common::terminal::{
    assert_screen_contains, buffer_contains, render_app, row_text, HEIGHT,
};
use crossterm::event::KeyCode;
use drivelab::core::TaskStatus;
use drivelab::ui::AppEvent;

#[test]
fn test_landing_screen() {
    let mut app = test_app(quiet_config());
    let buffer = render_app(&mut app, Instant::now());

    assert!(row_text(&buffer, 0).contains("DriveLab"));
    assert!(row_text(&buffer, 1).contains("File"));
    assert_screen_contains(&buffer, "Welcome to DriveLab");
    assert_screen_contains(&buffer, "Starting DriveLab…");
    for feature in [
        "Critical Event Sieve",
        "Scene Generation",
        "Scenario Generation",
        "Drive Lab",
    ] {
        assert_screen_contains(&buffer, feature);
    }

    let status = row_text(&buffer, HEIGHT - 1);
    assert!(status.contains("Ready"), "status bar: {status}");
    assert!(status.contains("■ Idle"), "status bar: {status}");
    assert!(!buffer_contains(&buffer, "urban_intersection"));
}

#[test]
fn test_ready_event_dismisses_splash() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    render_app(&mut app, now);
    assert!(app.splash_visible());

    app.handle_app_event(AppEvent::Ready, now);
    let buffer = render_app(&mut app, now);
    assert!(!app.splash_visible());
    assert_screen_contains(&buffer, "Choose a workflow to get started");
}

#[test]
fn test_workspace_screen_shows_explorer_tabs_and_player() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Critical Event Sieve");
    app.navigate("Drive Lab");

    let buffer = render_app(&mut app, now);
    assert!(row_text(&buffer, 0).contains("Drive Lab"));
    assert_screen_contains(&buffer, "urban_intersection");
    assert_screen_contains(&buffer, "critical_events.ces");
    assert_screen_contains(&buffer, "[1] ◈ Critical Event Sieve");
    assert_screen_contains(&buffer, "[2] ▶ Drive Lab");
    assert_screen_contains(&buffer, "drive_lab_session.mp4");
    assert!(!buffer_contains(&buffer, "Welcome to DriveLab"));
}

#[test]
fn test_closed_last_tab_keeps_workspace_until_landing() {
    let mut app = test_app(quiet_config());
    let closed_at = Instant::now();
    app.navigate("Drive Lab");
    app.workspace_mut().close_active(closed_at);

    let buffer = render_app(&mut app, closed_at);
    assert_screen_contains(&buffer, "No tab open");

    let later = closed_at + Duration::from_millis(200);
    app.tick(later);
    let buffer = render_app(&mut app, later);
    assert_screen_contains(&buffer, "Welcome to DriveLab");
}

#[test]
fn test_status_bar_reports_running_task() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    let tasks = app.workspace_mut().tasks_mut();
    let id = tasks.start("Extracting video frames", None);
    tasks.update_progress(id, 40, None);

    let status = row_text(&render_app(&mut app, now), HEIGHT - 1);
    assert!(
        status.contains("Extracting video frames 40%"),
        "status bar: {status}"
    );
    assert!(status.contains("1 running"), "status bar: {status}");

    app.workspace_mut()
        .tasks_mut()
        .complete_at(id, TaskStatus::Completed, now);
    let status = row_text(&render_app(&mut app, now), HEIGHT - 1);
    assert!(!status.contains("running"), "status bar: {status}");

    // Gone once the grace period passes
    app.tick(now + Duration::from_secs(4));
    let status = row_text(&render_app(&mut app, now), HEIGHT - 1);
    assert!(!status.contains("Extracting"), "status bar: {status}");
}

#[test]
fn test_maximize_hides_sidebar() {
    let chrome = Arc::new(RecordingChrome::default());
    let mut app = test_app(quiet_config()).with_chrome(chrome);
    let now = Instant::now();
    app.navigate("Scene Generation");

    let buffer = render_app(&mut app, now);
    assert_screen_contains(&buffer, "Drive Lab");

    press(&mut app, KeyCode::F(11), now);
    let buffer = render_app(&mut app, now);
    assert!(!buffer_contains(&buffer, "Drive Lab"));
    assert_screen_contains(&buffer, "Scene Generation · Location");
}
