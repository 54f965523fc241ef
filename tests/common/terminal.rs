//! TUI testing utilities using Ratatui's TestBackend
//!
//! Renders the whole shell into a test buffer and flattens it to text.

use std::time::Instant;

use drivelab::App;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Wide enough for sidebar, explorer and the location panel side by side
pub const WIDTH: u16 = 160;
pub const HEIGHT: u16 = 40;

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Draw one frame of the shell and return the resulting buffer
pub fn render_app(app: &mut App, now: Instant) -> Buffer {
    let mut terminal = create_test_terminal_sized(WIDTH, HEIGHT);
    terminal
        .draw(|f| app.draw(f, now))
        .expect("Failed to draw shell");
    app.after_draw();
    terminal.backend().buffer().clone()
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Text of a single row, trailing whitespace trimmed
pub fn row_text(buffer: &Buffer, y: u16) -> String {
    region_to_string(buffer, Rect::new(0, y, buffer.area.width, 1))
        .trim_end()
        .to_string()
}

/// Extract a specific region of the buffer as a string
pub fn region_to_string(buffer: &Buffer, area: Rect) -> String {
    let mut output = String::new();

    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        if y + 1 < area.y + area.height {
            output.push('\n');
        }
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Assert the buffer contains `expected`, dumping the screen on failure
pub fn assert_screen_contains(buffer: &Buffer, expected: &str) {
    let screen = buffer_to_string(buffer);
    assert!(
        screen.contains(expected),
        "Screen does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        screen
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_row_text_trims() {
        let mut terminal = create_test_terminal_sized(20, 3);
        terminal
            .draw(|f| f.render_widget(Paragraph::new("ABC\nsecond"), f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(row_text(buffer, 0), "ABC");
        assert_eq!(row_text(buffer, 1), "second");
        assert!(buffer_contains(buffer, "second"));
        assert!(!buffer_contains(buffer, "third"));
    }
}
