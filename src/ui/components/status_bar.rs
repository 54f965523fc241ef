use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::{BackgroundTask, ShellStatus, TaskStatus};

use super::theme::{ACCENT_ERROR, ACCENT_SUCCESS, STATUS_BAR_BG, TEXT_BRIGHT};

/// Bottom bar: current task text, background tasks and selection flags
pub struct StatusBar<'a> {
    status: &'a ShellStatus,
    current: Option<&'a BackgroundTask>,
    active_tasks: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a ShellStatus) -> Self {
        Self {
            status,
            current: None,
            active_tasks: 0,
        }
    }

    pub fn tasks(mut self, current: Option<&'a BackgroundTask>, active_tasks: usize) -> Self {
        self.current = current;
        self.active_tasks = active_tasks;
        self
    }

    fn flag(label: &str, on: bool) -> Span<'static> {
        let mark = if on { "✓" } else { "–" };
        Span::styled(
            format!(" {} {} ", label, mark),
            Style::default().fg(TEXT_BRIGHT),
        )
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().fg(TEXT_BRIGHT);
        let mut spans = Vec::new();

        let text = if self.status.current_task.is_empty() {
            "Ready"
        } else {
            self.status.current_task.as_str()
        };
        spans.push(Span::styled(format!(" {} ", text), base));

        if let Some(task) = self.current {
            let style = match task.status {
                TaskStatus::Running => base.add_modifier(Modifier::BOLD),
                TaskStatus::Completed => base.fg(ACCENT_SUCCESS),
                TaskStatus::Failed => base.fg(ACCENT_ERROR),
            };
            spans.push(Span::styled(
                format!("│ {} {}% ", task.name, task.progress),
                style,
            ));
            if let Some(details) = &task.details {
                spans.push(Span::styled(format!("{} ", details), base));
            }
        }
        if self.active_tasks > 0 {
            spans.push(Span::styled(
                format!("│ {} running ", self.active_tasks),
                base,
            ));
        }

        spans.push(Span::raw("│"));
        spans.push(Self::flag("Location", self.status.has_location));
        spans.push(Self::flag("Tile", self.status.has_tile));
        let playback = if self.status.is_playing {
            " ▶ Playing "
        } else {
            " ■ Idle "
        };
        spans.push(Span::styled(format!("│{}", playback), base));

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(STATUS_BAR_BG))
            .render(area, buf);
    }
}
