//! Sidebar widget for the TUI.
//!
//! Displays the schema snapshot as a table/column tree, or a warning
//! when no schema is available.

use crate::db::SchemaMap;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Sidebar widget for the schema snapshot.
pub struct Sidebar<'a> {
    schema: &'a SchemaMap,
    scroll: usize,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    /// Creates a new sidebar widget.
    pub fn new(schema: &'a SchemaMap, scroll: usize, focused: bool) -> Self {
        Self {
            schema,
            scroll,
            focused,
        }
    }

    /// Builds the display lines for the schema tree.
    fn schema_lines(schema: &SchemaMap) -> Vec<Line<'_>> {
        if schema.is_empty() {
            return vec![Line::from(Span::styled(
                "No schema available",
                Style::default().fg(Color::Yellow),
            ))];
        }

        let mut lines = Vec::new();
        for table in schema.tables() {
            lines.push(Line::from(Span::styled(
                table.name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for column in &table.columns {
                lines.push(Line::from(Span::styled(
                    format!("  {column}"),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
        lines
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Tables ");

        Paragraph::new(Self::schema_lines(self.schema))
            .block(block)
            .scroll((self.scroll as u16, 0))
            .render(area, buf);
    }
}
