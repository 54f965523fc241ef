//! Sidebar listing the landing entry and every feature

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::{FeatureKey, LANDING_TARGET};

use super::theme::{
    ACCENT_PRIMARY, BG_PANEL, BORDER_DEFAULT, BORDER_FOCUSED, SELECTED_BG, SELECTED_BG_DIM,
    TEXT_MUTED, TEXT_PRIMARY,
};

/// Navigation targets in display order: landing first, then features
pub fn sidebar_entries() -> Vec<(&'static str, &'static str)> {
    std::iter::once((LANDING_TARGET, "⌂"))
        .chain(FeatureKey::ALL.iter().map(|key| (key.display_name(), key.icon())))
        .collect()
}

#[derive(Debug)]
pub struct SidebarState {
    pub selected: usize,
    pub visible: bool,
    pub focused: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            selected: 0,
            visible: true,
            focused: false,
        }
    }
}

impl SidebarState {
    pub fn select_next(&mut self) {
        let len = sidebar_entries().len();
        self.selected = (self.selected + 1) % len;
    }

    pub fn select_prev(&mut self) {
        let len = sidebar_entries().len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Target name of the highlighted entry
    pub fn selected_target(&self) -> &'static str {
        sidebar_entries()
            .get(self.selected)
            .map(|(name, _)| *name)
            .unwrap_or(LANDING_TARGET)
    }

    /// Highlight the entry for `target`, if listed
    pub fn select_target(&mut self, target: &str) {
        if let Some(index) = sidebar_entries().iter().position(|(name, _)| *name == target) {
            self.selected = index;
        }
    }
}

pub struct Sidebar<'a> {
    state: &'a SidebarState,
    /// Entry for the active tab, drawn with a marker
    current: Option<&'a str>,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a SidebarState) -> Self {
        Self {
            state,
            current: None,
        }
    }

    pub fn current(mut self, current: Option<&'a str>) -> Self {
        self.current = current;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border = if self.state.focused {
            BORDER_FOCUSED
        } else {
            BORDER_DEFAULT
        };
        let block = Block::default()
            .title(" Navigation ")
            .borders(Borders::RIGHT | Borders::TOP)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = sidebar_entries()
            .into_iter()
            .enumerate()
            .map(|(i, (name, icon))| {
                let is_current = self.current == Some(name);
                let mut style = if is_current {
                    Style::default()
                        .fg(ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT_PRIMARY)
                };
                if i == self.state.selected {
                    let bg = if self.state.focused {
                        SELECTED_BG
                    } else {
                        SELECTED_BG_DIM
                    };
                    style = style.bg(bg);
                }
                Line::from(vec![
                    Span::styled(format!(" {} ", icon), Style::default().fg(TEXT_MUTED)),
                    Span::styled(name, style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
