//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Cursor position in the query (byte offset)
    cursor: usize,
    /// Prompt text
    prompt: &'a str,
    /// Theme for styling
    theme: &'a Theme,
    /// Matched and total item counts
    counts: Option<(usize, usize)>,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, prompt: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            prompt,
            theme,
            counts: None,
        }
    }

    /// Show `matched/total` in the title
    #[must_use]
    pub const fn counts(mut self, matched: usize, total: usize) -> Self {
        self.counts = Some((matched, total));
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.counts {
            Some((matched, total)) => format!(" Search ({matched}/{total}) "),
            None => " Search ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_span = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let mut spans = vec![
            Span::styled(self.prompt, self.theme.dimmed_style()),
            Span::raw(" "),
        ];

        let split = self.cursor.min(self.query.len());
        let (before, after) = self.query.split_at(split);
        spans.push(Span::raw(before));
        spans.push(cursor_span);
        spans.push(Span::raw(after));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
