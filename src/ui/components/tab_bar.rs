use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::{ACCENT_PRIMARY, TAB_BAR_BG, TEXT_BRIGHT, TEXT_FAINT, TEXT_MUTED};

/// Tab bar for the open workspace tabs
pub struct TabBar<'a> {
    tabs: Vec<(&'a str, Option<&'a str>)>,
    active: Option<usize>,
    focused: bool,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: Vec<(&'a str, Option<&'a str>)>, active: Option<usize>) -> Self {
        Self {
            tabs,
            active,
            focused: true,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, (name, icon)) in self.tabs.iter().enumerate() {
            let is_active = Some(i) == self.active;

            if is_active && self.focused {
                spans.push(Span::styled(" ▶ ", Style::default().fg(ACCENT_PRIMARY)));
            } else {
                spans.push(Span::raw("   "));
            }

            let tab_style = if is_active {
                if self.focused {
                    Style::default()
                        .fg(TEXT_BRIGHT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT_MUTED)
                }
            } else {
                Style::default().fg(TEXT_FAINT)
            };

            let label = match icon {
                Some(icon) => format!("[{}] {} {}", i + 1, icon, name),
                None => format!("[{}] {}", i + 1, name),
            };
            spans.push(Span::styled(label, tab_style));
            spans.push(Span::styled(" ×", Style::default().fg(TEXT_FAINT)));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(TAB_BAR_BG))
            .render(area, buf);
    }
}
