//! Landing dashboard shown while no tabs are open

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::core::FeatureKey;

use super::theme::{
    ACCENT_PRIMARY, BG_BASE, BORDER_DEFAULT, BORDER_FOCUSED, TEXT_BRIGHT, TEXT_MUTED,
};

fn card_blurb(key: FeatureKey) -> &'static str {
    match key {
        FeatureKey::CriticalEventSieve => "Upload drive recordings and surface critical events.",
        FeatureKey::SceneGeneration => "Pick a location and map tile to build a scene.",
        FeatureKey::ScenarioGeneration => "Compose scenarios anchored to real places.",
        FeatureKey::DriveLab => "Replay and inspect simulated drives.",
    }
}

#[derive(Debug, Default)]
pub struct LandingState {
    pub selected: usize,
}

impl LandingState {
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FeatureKey::ALL.len();
    }

    pub fn select_prev(&mut self) {
        let len = FeatureKey::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn selected_feature(&self) -> FeatureKey {
        FeatureKey::ALL[self.selected % FeatureKey::ALL.len()]
    }
}

pub struct LandingDashboard<'a> {
    state: &'a LandingState,
    splash: bool,
}

impl<'a> LandingDashboard<'a> {
    pub fn new(state: &'a LandingState) -> Self {
        Self {
            state,
            splash: false,
        }
    }

    /// Show the startup line until the shell reports ready
    pub fn splash(mut self, splash: bool) -> Self {
        self.splash = splash;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .style(Style::default().bg(BG_BASE))
            .render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(6),
            ])
            .split(area);

        let subtitle = if self.splash {
            "Starting DriveLab…"
        } else {
            "Choose a workflow to get started"
        };
        let header = vec![
            Line::from(Span::styled(
                "Welcome to DriveLab",
                Style::default()
                    .fg(TEXT_BRIGHT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(subtitle, Style::default().fg(TEXT_MUTED))),
        ];
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .render(rows[1], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[2]);

        for (i, key) in FeatureKey::ALL.iter().enumerate() {
            let selected = i == self.state.selected;
            let border = if selected { BORDER_FOCUSED } else { BORDER_DEFAULT };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", key.icon()));
            let title_style = if selected {
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_BRIGHT)
            };
            let body = vec![
                Line::from(Span::styled(key.display_name(), title_style)),
                Line::from(""),
                Line::from(Span::styled(card_blurb(*key), Style::default().fg(TEXT_MUTED))),
            ];
            Paragraph::new(body)
                .block(block)
                .wrap(Wrap { trim: true })
                .render(columns[i], buf);
        }
    }
}
