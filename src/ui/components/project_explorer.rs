//! Project explorer: the fixed tree of scenario files

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::FeatureKey;

use super::theme::{
    BG_PANEL, BORDER_DEFAULT, BORDER_FOCUSED, SELECTED_BG, SELECTED_BG_DIM, TEXT_MUTED,
    TEXT_PRIMARY,
};

pub const PROJECT_NAME: &str = "urban_intersection";

/// Files shown under the project root
pub const PROJECT_FILES: [&str; 6] = [
    "critical_events.ces",
    "scene.scn",
    "scenario.sce",
    "drive_lab.dlab",
    "README.md",
    "notes.txt",
];

#[derive(Debug, Default)]
pub struct ExplorerState {
    pub selected: usize,
    pub focused: bool,
}

impl ExplorerState {
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % PROJECT_FILES.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + PROJECT_FILES.len() - 1) % PROJECT_FILES.len();
    }

    pub fn selected_file(&self) -> &'static str {
        PROJECT_FILES[self.selected.min(PROJECT_FILES.len() - 1)]
    }
}

pub struct ProjectExplorer<'a> {
    state: &'a ExplorerState,
}

impl<'a> ProjectExplorer<'a> {
    pub fn new(state: &'a ExplorerState) -> Self {
        Self { state }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let border = if self.state.focused {
            BORDER_FOCUSED
        } else {
            BORDER_DEFAULT
        };
        let block = Block::default()
            .title(" Explorer ")
            .borders(Borders::RIGHT | Borders::TOP)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            format!("▾ {}", PROJECT_NAME),
            Style::default().fg(TEXT_MUTED),
        ))];
        for (i, file) in PROJECT_FILES.iter().enumerate() {
            let icon = FeatureKey::from_file_name(file)
                .map(|key| key.icon())
                .unwrap_or("·");
            let mut style = Style::default().fg(TEXT_PRIMARY);
            if i == self.state.selected {
                style = style.bg(if self.state.focused {
                    SELECTED_BG
                } else {
                    SELECTED_BG_DIM
                });
            }
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{} ", icon), Style::default().fg(TEXT_MUTED)),
                Span::styled(*file, style),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
