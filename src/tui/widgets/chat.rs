//! Chat panel widget for the TUI.
//!
//! Displays the conversation history: questions, answers, and errors.

use crate::tui::app::ChatMessage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Chat panel widget.
pub struct ChatPanel<'a> {
    messages: &'a [ChatMessage],
    scroll: usize,
    focused: bool,
}

impl<'a> ChatPanel<'a> {
    /// Creates a new chat panel widget.
    pub fn new(messages: &'a [ChatMessage], scroll: usize, focused: bool) -> Self {
        Self {
            messages,
            scroll,
            focused,
        }
    }

    /// Builds the display lines for a single message.
    fn message_lines(message: &ChatMessage) -> Vec<Line<'_>> {
        let (indicator, label_color, text) = match message {
            ChatMessage::User(text) => ("", Color::Cyan, text),
            ChatMessage::Answer(text) => ("✔ ", Color::Green, text),
            ChatMessage::Error(text) => ("✘ ", Color::Red, text),
            ChatMessage::System(text) => ("", Color::Yellow, text),
        };

        let label = Line::from(Span::styled(
            format!("{indicator}{}", message.type_label()),
            Style::default()
                .fg(label_color)
                .add_modifier(Modifier::BOLD),
        ));

        let mut lines = vec![label];
        for text_line in text.lines() {
            lines.push(Line::from(Span::raw(text_line)));
        }
        lines.push(Line::from(""));
        lines
    }
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Chat ");

        let lines: Vec<Line> = self
            .messages
            .iter()
            .flat_map(Self::message_lines)
            .collect();

        // scroll counts lines from the bottom; 0 pins the latest message
        let visible_height = area.height.saturating_sub(2) as usize;
        let top_line = scroll_top(lines.len(), visible_height, self.scroll);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((top_line, 0))
            .render(area, buf);
    }
}

/// Computes the paragraph scroll for a bottom-anchored view, saturating
/// instead of wrapping when the history outgrows u16.
fn scroll_top(total_lines: usize, visible_height: usize, scroll: usize) -> u16 {
    let top = total_lines
        .saturating_sub(visible_height)
        .saturating_sub(scroll);
    u16::try_from(top).unwrap_or(u16::MAX)
}
