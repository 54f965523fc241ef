//! Actions that can be triggered by keybindings
//!
//! Each action represents a single, atomic operation in the shell.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// All mappable UI actions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ========== Window ==========
    Quit,
    /// Toggle full-bleed layout
    Maximize,
    Minimize,
    ToggleSidebar,
    ToggleExplorer,

    // ========== Navigation ==========
    /// Close all tabs and show the landing dashboard
    GoHome,
    CloseTab,
    NextTab,
    PrevTab,
    /// Switch to tab by number (1-9)
    SwitchToTab(u8),
    FocusSidebar,
    FocusExplorer,

    // ========== Transport ==========
    Play,
    Pause,
    Stop,
    Restart,

    // ========== Lists ==========
    SelectNext,
    SelectPrev,
    Confirm,
    Cancel,

    // ========== Feature panels ==========
    /// Focus the location search box
    StartSearch,
    Backspace,
    /// Add a video to the sieve
    Upload,
    /// Pick the map tile under the current location
    SelectTile,
    /// Clear location and tile selections
    ResetSelection,
}

impl Action {
    /// Name used in config files
    pub fn config_name(&self) -> Cow<'static, str> {
        let name = match self {
            Action::Quit => "quit",
            Action::Maximize => "maximize",
            Action::Minimize => "minimize",
            Action::ToggleSidebar => "toggle_sidebar",
            Action::ToggleExplorer => "toggle_explorer",
            Action::GoHome => "go_home",
            Action::CloseTab => "close_tab",
            Action::NextTab => "next_tab",
            Action::PrevTab => "prev_tab",
            Action::SwitchToTab(n) => return Cow::Owned(format!("switch_to_tab_{}", n)),
            Action::FocusSidebar => "focus_sidebar",
            Action::FocusExplorer => "focus_explorer",
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Stop => "stop",
            Action::Restart => "restart",
            Action::SelectNext => "select_next",
            Action::SelectPrev => "select_prev",
            Action::Confirm => "confirm",
            Action::Cancel => "cancel",
            Action::StartSearch => "start_search",
            Action::Backspace => "backspace",
            Action::Upload => "upload",
            Action::SelectTile => "select_tile",
            Action::ResetSelection => "reset_selection",
        };
        Cow::Borrowed(name)
    }

    /// Short label for the footer hints
    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::Maximize => "Maximize",
            Action::Minimize => "Minimize",
            Action::ToggleSidebar => "Sidebar",
            Action::ToggleExplorer => "Explorer",
            Action::GoHome => "Home",
            Action::CloseTab => "Close tab",
            Action::NextTab => "Next tab",
            Action::PrevTab => "Previous tab",
            Action::SwitchToTab(_) => "Switch tab",
            Action::FocusSidebar => "Focus sidebar",
            Action::FocusExplorer => "Focus explorer",
            Action::Play => "Play",
            Action::Pause => "Pause",
            Action::Stop => "Stop",
            Action::Restart => "Restart",
            Action::SelectNext => "Next",
            Action::SelectPrev => "Previous",
            Action::Confirm => "Open",
            Action::Cancel => "Back",
            Action::StartSearch => "Search",
            Action::Backspace => "Delete char",
            Action::Upload => "Upload",
            Action::SelectTile => "Select tile",
            Action::ResetSelection => "Reset",
        }
    }
}

/// Parse an action name from config into an Action
pub fn parse_action(name: &str) -> Option<Action> {
    let action = match name {
        "quit" | "q" => Action::Quit,
        "maximize" => Action::Maximize,
        "minimize" => Action::Minimize,
        "toggle_sidebar" => Action::ToggleSidebar,
        "toggle_explorer" => Action::ToggleExplorer,
        "go_home" | "home" => Action::GoHome,
        "close_tab" => Action::CloseTab,
        "next_tab" => Action::NextTab,
        "prev_tab" => Action::PrevTab,
        "focus_sidebar" => Action::FocusSidebar,
        "focus_explorer" => Action::FocusExplorer,
        "play" => Action::Play,
        "pause" => Action::Pause,
        "stop" => Action::Stop,
        "restart" => Action::Restart,
        "select_next" => Action::SelectNext,
        "select_prev" => Action::SelectPrev,
        "confirm" => Action::Confirm,
        "cancel" => Action::Cancel,
        "start_search" => Action::StartSearch,
        "backspace" => Action::Backspace,
        "upload" => Action::Upload,
        "select_tile" => Action::SelectTile,
        "reset_selection" | "reset" => Action::ResetSelection,
        other => {
            let n: u8 = other.strip_prefix("switch_to_tab_")?.parse().ok()?;
            if !(1..=9).contains(&n) {
                return None;
            }
            Action::SwitchToTab(n)
        }
    };
    Some(action)
}
