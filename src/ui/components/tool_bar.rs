use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{ACCENT_PRIMARY, TEXT_FAINT, TEXT_MUTED, TOOL_BAR_BG};

const BUTTONS: [(&str, &str); 4] = [
    ("▶", "Play"),
    ("⏸", "Pause"),
    ("■", "Stop"),
    ("↻", "Restart"),
];

/// Transport buttons; greyed out until there is content to control
pub struct ToolBar {
    enabled: bool,
}

impl ToolBar {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let (glyph_style, label_style) = if self.enabled {
            (
                Style::default().fg(ACCENT_PRIMARY),
                Style::default().fg(TEXT_MUTED),
            )
        } else {
            (Style::default().fg(TEXT_FAINT), Style::default().fg(TEXT_FAINT))
        };

        let mut spans = vec![Span::raw(" ")];
        for (glyph, label) in BUTTONS {
            spans.push(Span::styled(format!(" {} ", glyph), glyph_style));
            spans.push(Span::styled(format!("{} ", label), label_style));
        }
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(TOOL_BAR_BG))
            .render(area, buf);
    }
}
