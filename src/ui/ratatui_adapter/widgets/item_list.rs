//! Item list widget for displaying results with match highlighting

use crate::item::Item;
use crate::matching::{MappedResult, Segment};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};
use std::collections::HashSet;
use std::ops::Range;

/// Custom row renderer, given the item and its segments when a query is active
pub type ItemRenderer = dyn Fn(&Item, Option<&[Segment]>) -> Line<'static>;

/// Item list widget that displays results with cursor and chosen markers
pub struct ItemList<'a> {
    /// Results to display
    results: &'a [MappedResult],
    /// Rows to render
    visible: Range<usize>,
    /// Index of the highlighted row
    highlighted: Option<usize>,
    /// Ids already chosen
    chosen: &'a HashSet<String>,
    /// Whether segments carry match information
    ranked: bool,
    /// Theme for styling
    theme: &'a Theme,
    /// Optional custom renderer
    renderer: Option<&'a ItemRenderer>,
}

impl<'a> ItemList<'a> {
    /// Create a new item list widget
    #[must_use]
    pub fn new(
        results: &'a [MappedResult],
        visible: Range<usize>,
        chosen: &'a HashSet<String>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            results,
            visible,
            highlighted: None,
            chosen,
            ranked: true,
            theme,
            renderer: None,
        }
    }

    /// Set the highlighted row
    #[must_use]
    pub const fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    /// Mark whether results come from a query
    #[must_use]
    pub const fn ranked(mut self, ranked: bool) -> Self {
        self.ranked = ranked;
        self
    }

    /// Use a custom renderer for the item text
    #[must_use]
    pub fn renderer(mut self, renderer: Option<&'a ItemRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Spans for the item text, highlighting matched segments
    fn segment_spans(&self, result: &MappedResult, base: Style) -> Vec<Span<'static>> {
        result
            .segments
            .iter()
            .map(|segment| {
                let style = if segment.is_match {
                    base.patch(self.theme.match_style())
                } else {
                    base
                };
                Span::styled(segment.text.clone(), style)
            })
            .collect()
    }

    /// Render a single row
    fn render_row(&self, result: &MappedResult, is_cursor: bool) -> ListItem<'static> {
        let is_chosen = self.chosen.contains(&result.item.id);

        let cursor_char = if is_cursor { ">" } else { " " };
        let chosen_char = if is_chosen { "✓" } else { " " };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(chosen_char, self.theme.chosen_style()),
            Span::raw(" "),
        ];

        let text_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        if let Some(render) = self.renderer {
            let segments = self.ranked.then_some(result.segments.as_slice());
            spans.extend(render(&result.item, segments).spans);
        } else {
            spans.extend(self.segment_spans(result, text_style));
        }

        let line = Line::from(spans);
        if is_cursor {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let items: Vec<ListItem> = self
            .visible
            .clone()
            .filter_map(|idx| {
                let result = self.results.get(idx)?;
                Some(self.render_row(result, self.highlighted == Some(idx)))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchRange, map_match};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_renders_visible_rows_with_markers() {
        let results: Vec<MappedResult> = ["apple", "banana", "grape"]
            .iter()
            .enumerate()
            .map(|(i, name)| MappedResult::unranked(&Item::new(i.to_string(), *name)))
            .collect();
        let chosen: HashSet<String> = ["2".to_string()].into_iter().collect();
        let theme = Theme::default();

        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        ItemList::new(&results, 1..3, &chosen, &theme)
            .highlighted(Some(1))
            .ranked(false)
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("> ") && row_text(&buf, 1).contains("banana"));
        assert!(row_text(&buf, 2).contains("✓ grape"));
    }

    #[test]
    fn test_match_style_applied() {
        let item = Item::new("1", "apple");
        let result = map_match(&item, "apple", &[MatchRange::new(0, 1)], 0.0);
        let chosen = HashSet::new();
        let theme = Theme::default();

        let list = ItemList::new(std::slice::from_ref(&result), 0..1, &chosen, &theme);
        let spans = list.segment_spans(&result, Style::default());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "ap");
        assert_eq!(spans[0].style.fg, Some(theme.match_highlight));
        assert_eq!(spans[1].style.fg, None);
    }

    #[test]
    fn test_custom_renderer_gets_segments_only_when_ranked() {
        let item = Item::new("1", "apple");
        let result = map_match(&item, "apple", &[MatchRange::new(0, 1)], 0.0);
        let chosen = HashSet::new();
        let theme = Theme::default();
        let renderer: Box<ItemRenderer> = Box::new(|item: &Item, segments: Option<&[Segment]>| {
            Line::from(format!("{}:{}", item.id, segments.map_or(0, <[Segment]>::len)))
        });

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ItemList::new(std::slice::from_ref(&result), 0..1, &chosen, &theme)
            .renderer(Some(renderer.as_ref()))
            .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("1:2"));

        let mut buf = Buffer::empty(area);
        ItemList::new(std::slice::from_ref(&result), 0..1, &chosen, &theme)
            .ranked(false)
            .renderer(Some(renderer.as_ref()))
            .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("1:0"));
    }
}
