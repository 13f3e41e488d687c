//! Input widget for the TUI.
//!
//! Provides a single-line text input field with cursor support.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    if cursor <= available_width {
        0
    } else {
        cursor.saturating_sub(available_width)
    }
}

/// Returns the text with the first `scroll_offset` characters skipped.
///
/// The offset counts characters, not bytes; byte slicing would split
/// multibyte input.
fn visible_portion(text: &str, scroll_offset: usize) -> String {
    text.chars().skip(scroll_offset).collect()
}

/// Input bar widget.
pub struct InputBar<'a> {
    text: &'a str,
    cursor: usize,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(text: &'a str, cursor: usize, focused: bool) -> Self {
        Self {
            text,
            cursor,
            focused,
        }
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Ask ");

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        // Border left (1) + prompt "> " (2) + border right (1) + cursor space (1) = 5
        let available_width = area.width.saturating_sub(5) as usize;
        let scroll_offset = calculate_scroll_offset(self.cursor, available_width);
        let visible_text = visible_portion(self.text, scroll_offset);

        let line = Line::from(vec![
            Span::styled("> ", prompt_style),
            Span::raw(visible_text),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
