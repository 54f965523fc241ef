use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{ACCENT_PRIMARY, TEXT_BRIGHT, TEXT_MUTED, TITLE_BAR_BG};

pub const PRODUCT_NAME: &str = "DriveLab";

/// Window title with the chrome glyphs at the right edge
pub struct TitleBar<'a> {
    subtitle: Option<&'a str>,
    maximized: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(subtitle: Option<&'a str>) -> Self {
        Self {
            subtitle,
            maximized: false,
        }
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" ◆ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::styled(
                PRODUCT_NAME,
                Style::default().fg(TEXT_BRIGHT).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(subtitle) = self.subtitle {
            spans.push(Span::styled(
                format!("  {}", subtitle),
                Style::default().fg(TEXT_MUTED),
            ));
        }
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(TITLE_BAR_BG))
            .render(area, buf);

        let chrome = if self.maximized { "─ ❐ ✕ " } else { "─ □ ✕ " };
        let width = chrome.width() as u16;
        if area.width > width {
            let x = area.x + area.width - width;
            buf.set_string(x, area.y, chrome, Style::default().fg(TEXT_MUTED).bg(TITLE_BAR_BG));
        }
    }
}
