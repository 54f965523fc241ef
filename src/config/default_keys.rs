//! Default keybindings, used when no user configuration is present.

use std::collections::HashMap;

use super::keys::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;

fn bind(map: &mut HashMap<KeyCombo, Action>, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        map.insert(combo, action);
    }
}

/// List navigation shared by every navigable context
fn bind_list_navigation(map: &mut HashMap<KeyCombo, Action>) {
    bind(map, "j", Action::SelectNext);
    bind(map, "k", Action::SelectPrev);
    bind(map, "<Down>", Action::SelectNext);
    bind(map, "<Up>", Action::SelectPrev);
    bind(map, "<CR>", Action::Confirm);
    bind(map, "<Esc>", Action::Cancel);
}

pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    // ========== Global ==========
    bind(&mut config.global, "C-q", Action::Quit);
    bind(&mut config.global, "C-\\", Action::ToggleSidebar);
    bind(&mut config.global, "C-e", Action::ToggleExplorer);
    bind(&mut config.global, "C-s", Action::FocusSidebar);
    bind(&mut config.global, "C-o", Action::FocusExplorer);
    bind(&mut config.global, "C-w", Action::CloseTab);
    bind(&mut config.global, "M-g", Action::GoHome);
    bind(&mut config.global, "M-l", Action::NextTab);
    bind(&mut config.global, "M-h", Action::PrevTab);
    bind(&mut config.global, "<C-PageDown>", Action::NextTab);
    bind(&mut config.global, "<C-PageUp>", Action::PrevTab);
    bind(&mut config.global, "<F9>", Action::Minimize);
    bind(&mut config.global, "<F11>", Action::Maximize);

    for i in 1..=9u8 {
        let key = format!("M-{}", i);
        bind(&mut config.global, &key, Action::SwitchToTab(i));
    }

    // ========== Landing ==========
    let landing = config.context.entry(KeyContext::Landing).or_default();
    bind_list_navigation(landing);
    bind(landing, "q", Action::Quit);

    // ========== Workspace ==========
    let workspace = config.context.entry(KeyContext::Workspace).or_default();
    bind_list_navigation(workspace);
    bind(workspace, "p", Action::Play);
    bind(workspace, "<Space>", Action::Pause);
    bind(workspace, "s", Action::Stop);
    bind(workspace, "r", Action::Restart);
    bind(workspace, "/", Action::StartSearch);
    bind(workspace, "u", Action::Upload);
    bind(workspace, "t", Action::SelectTile);
    bind(workspace, "x", Action::ResetSelection);

    // ========== Sidebar / Explorer ==========
    bind_list_navigation(config.context.entry(KeyContext::Sidebar).or_default());
    bind_list_navigation(config.context.entry(KeyContext::Explorer).or_default());

    // ========== Search ==========
    let search = config.context.entry(KeyContext::Search).or_default();
    bind(search, "<Down>", Action::SelectNext);
    bind(search, "<Up>", Action::SelectPrev);
    bind(search, "<CR>", Action::Confirm);
    bind(search, "<Esc>", Action::Cancel);
    bind(search, "<BS>", Action::Backspace);

    config
}
