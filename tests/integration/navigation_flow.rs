//! Navigation scenarios driven through the shell's keybindings

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::fixtures::{press, press_with, quiet_config, test_app, RecordingChrome};
use crossterm::event::{KeyCode, KeyModifiers};
use drivelab::ui::{FeatureView, InputMode};
use drivelab::{NavigationOutcome, ViewMode};

fn tab_names(app: &drivelab::App) -> Vec<String> {
    app.workspace()
        .tabs()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_shell_starts_on_landing() {
    let app = test_app(quiet_config());
    let now = Instant::now();
    assert_eq!(app.workspace().view_mode(now), ViewMode::Landing);
    assert!(app.workspace().tabs().is_empty());
    assert!(!app.workspace().explorer_open());
    assert_eq!(app.status().current_task, "");
}

#[test]
fn test_dashboard_card_opens_feature_tab() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();

    // Second card
    press(&mut app, KeyCode::Char('j'), now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.workspace().view_mode(now), ViewMode::Workspace);
    assert!(app.workspace().explorer_open());
    assert_eq!(tab_names(&app), vec!["Scene Generation"]);
    assert!(matches!(
        app.workspace().active_content(),
        Some(FeatureView::Location(_))
    ));
}

#[test]
fn test_navigating_twice_reuses_tab() {
    let mut app = test_app(quiet_config());

    assert_eq!(
        app.navigate("Drive Lab"),
        NavigationOutcome::Opened("Drive Lab".into())
    );
    app.navigate("Critical Event Sieve");
    assert_eq!(
        app.navigate("Drive Lab"),
        NavigationOutcome::Activated("Drive Lab".into())
    );

    assert_eq!(tab_names(&app), vec!["Drive Lab", "Critical Event Sieve"]);
    assert_eq!(app.workspace().tabs().active_name(), Some("Drive Lab"));
}

#[test]
fn test_sidebar_selection_navigates() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();

    press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL, now);
    assert_eq!(app.input_mode(), InputMode::SidebarNavigation);

    // Home, Sieve, Scene, Scenario, Drive Lab
    for _ in 0..4 {
        press(&mut app, KeyCode::Down, now);
    }
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.input_mode(), InputMode::Normal);
    assert_eq!(app.workspace().tabs().active_name(), Some("Drive Lab"));
    assert_eq!(app.sidebar().selected_target(), "Drive Lab");
}

#[test]
fn test_home_clears_tabs_immediately() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Drive Lab");
    app.navigate("Scenario Generation");

    press_with(&mut app, KeyCode::Char('g'), KeyModifiers::ALT, now);

    assert!(app.workspace().tabs().is_empty());
    assert_eq!(app.workspace().view_mode(now), ViewMode::Landing);
    assert!(!app.workspace().controls().play());
}

#[test]
fn test_closing_last_tab_returns_to_landing_after_debounce() {
    let mut app = test_app(quiet_config());
    let closed_at = Instant::now();
    app.navigate("Drive Lab");

    press_with(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL, closed_at);
    assert!(app.workspace().tabs().is_empty());

    app.tick(closed_at + Duration::from_millis(50));
    assert_eq!(
        app.workspace().view_mode(closed_at + Duration::from_millis(50)),
        ViewMode::Workspace
    );

    app.tick(closed_at + Duration::from_millis(120));
    assert_eq!(
        app.workspace().view_mode(closed_at + Duration::from_millis(120)),
        ViewMode::Landing
    );
    assert!(!app.workspace().explorer_open());
}

#[test]
fn test_reopening_within_debounce_keeps_workspace() {
    let mut app = test_app(quiet_config());
    let closed_at = Instant::now();
    app.navigate("Drive Lab");
    app.workspace_mut().close_active(closed_at);

    app.navigate("Critical Event Sieve");
    app.tick(closed_at + Duration::from_millis(500));

    assert_eq!(
        app.workspace().view_mode(closed_at + Duration::from_millis(500)),
        ViewMode::Workspace
    );
    assert_eq!(tab_names(&app), vec!["Critical Event Sieve"]);
}

#[test]
fn test_closing_middle_tab_activates_last() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Critical Event Sieve");
    app.navigate("Scene Generation");
    app.navigate("Drive Lab");
    app.workspace_mut().activate("Scene Generation");

    press_with(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL, now);

    assert_eq!(tab_names(&app), vec!["Critical Event Sieve", "Drive Lab"]);
    assert_eq!(app.workspace().tabs().active_name(), Some("Drive Lab"));
}

#[test]
fn test_tab_switching_by_number_and_cycle() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Critical Event Sieve");
    app.navigate("Scene Generation");
    app.navigate("Drive Lab");

    press_with(&mut app, KeyCode::Char('1'), KeyModifiers::ALT, now);
    assert_eq!(
        app.workspace().tabs().active_name(),
        Some("Critical Event Sieve")
    );

    press_with(&mut app, KeyCode::Char('h'), KeyModifiers::ALT, now);
    assert_eq!(app.workspace().tabs().active_name(), Some("Drive Lab"));

    // Out of range is ignored
    press_with(&mut app, KeyCode::Char('7'), KeyModifiers::ALT, now);
    assert_eq!(app.workspace().tabs().active_name(), Some("Drive Lab"));
}

#[test]
fn test_explorer_files_resolve_through_feature_registry() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Drive Lab");

    press_with(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL, now);
    assert_eq!(app.input_mode(), InputMode::ExplorerNavigation);

    // critical_events.ces, scene.scn
    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.workspace().tabs().active_name(), Some("scene.scn"));
    assert!(matches!(
        app.workspace().active_content(),
        Some(FeatureView::Location(_))
    ));

    // Skip to notes.txt
    for _ in 0..4 {
        press(&mut app, KeyCode::Down, now);
    }
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.workspace().tabs().active_name(), Some("notes.txt"));
    assert!(matches!(
        app.workspace().active_content(),
        Some(FeatureView::Document(_))
    ));
    assert!(app.workspace().controls().is_registered("notes.txt"));
}

#[test]
fn test_explorer_toggle_survives_tab_switch_until_navigation() {
    let mut app = test_app(quiet_config());
    let now = Instant::now();
    app.navigate("Drive Lab");
    app.navigate("Critical Event Sieve");

    press_with(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL, now);
    assert!(!app.workspace().explorer_open());

    press_with(&mut app, KeyCode::Char('l'), KeyModifiers::ALT, now);
    assert!(!app.workspace().explorer_open());

    app.navigate("Drive Lab");
    assert!(app.workspace().explorer_open());
}

#[test]
fn test_window_chrome_actions() {
    let chrome = Arc::new(RecordingChrome::default());
    let mut app = test_app(quiet_config()).with_chrome(chrome.clone());
    let now = Instant::now();

    press(&mut app, KeyCode::F(11), now);
    assert!(chrome.maximized.load(Ordering::SeqCst));
    press(&mut app, KeyCode::F(9), now);
    assert!(chrome.minimized.load(Ordering::SeqCst));

    assert!(!app.should_quit());
    press_with(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL, now);
    assert!(chrome.closed.load(Ordering::SeqCst));
    assert!(app.should_quit());
}
