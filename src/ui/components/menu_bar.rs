use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{MENU_BAR_BG, TEXT_PRIMARY};

pub const MENU_LABELS: [&str; 3] = ["File", "View", "Help"];

pub struct MenuBar;

impl MenuBar {
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = MENU_LABELS
            .iter()
            .map(|label| Span::styled(format!(" {} ", label), Style::default().fg(TEXT_PRIMARY)))
            .collect();
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(MENU_BAR_BG))
            .render(area, buf);
    }
}
