//! Scroll position of the item list

use std::ops::Range;

/// Visible window over a vertically stacked list of rows
///
/// Offsets and heights are in the same unit (terminal rows for the TUI,
/// pixels for other front ends). The picker writes to the viewport and
/// never reads the scroll position back into its selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Scroll position of the top edge
    pub offset: usize,
    /// Height of the visible area
    pub height: usize,
    /// Height of a single row
    pub row_height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Viewport {
    /// Create a viewport with unit row height
    #[must_use]
    pub const fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height,
            row_height: 1,
        }
    }

    /// Set the height of a single row
    #[must_use]
    pub const fn with_row_height(mut self, row_height: usize) -> Self {
        self.row_height = if row_height == 0 { 1 } else { row_height };
        self
    }

    /// Scroll so the element at `element_offset` is fully visible
    ///
    /// Elements above the window align to its top edge, elements below
    /// align to its bottom edge. Elements taller than the window align to
    /// the top. Returns `true` if the offset changed.
    pub const fn scroll_into_view(&mut self, element_offset: usize, element_height: usize) -> bool {
        let previous = self.offset;
        let element_bottom = element_offset + element_height;

        if element_offset < self.offset || element_height >= self.height {
            self.offset = element_offset;
        } else if element_bottom > self.offset + self.height {
            self.offset = element_bottom - self.height;
        }

        self.offset != previous
    }

    /// Scroll so row `index` is fully visible
    pub const fn ensure_row_visible(&mut self, index: usize) -> bool {
        self.scroll_into_view(index * self.row_height, self.row_height)
    }

    /// Update the visible height, keeping row `anchor` in view
    pub const fn set_height(&mut self, height: usize, anchor: Option<usize>) {
        self.height = height;
        if let Some(index) = anchor {
            self.ensure_row_visible(index);
        }
    }

    /// Scroll back to the top
    pub const fn reset(&mut self) {
        self.offset = 0;
    }

    /// Rows at least partially visible out of `total`
    #[must_use]
    pub fn visible_rows(&self, total: usize) -> Range<usize> {
        let first = self.offset / self.row_height;
        let last = (self.offset + self.height).div_ceil(self.row_height);
        first.min(total)..last.min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_visible_is_noop() {
        let mut vp = Viewport::new(5);
        assert!(!vp.ensure_row_visible(0));
        assert!(!vp.ensure_row_visible(4));
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn test_scroll_down_aligns_bottom() {
        let mut vp = Viewport::new(5);
        assert!(vp.ensure_row_visible(7));
        assert_eq!(vp.offset, 3);
        assert_eq!(vp.visible_rows(10), 3..8);
    }

    #[test]
    fn test_scroll_up_aligns_top() {
        let mut vp = Viewport::new(5);
        vp.offset = 6;
        assert!(vp.ensure_row_visible(2));
        assert_eq!(vp.offset, 2);
    }

    #[test]
    fn test_row_height() {
        let mut vp = Viewport::new(100).with_row_height(30);
        assert!(vp.ensure_row_visible(3));
        // Row 3 spans 90..120
        assert_eq!(vp.offset, 20);
        assert_eq!(vp.visible_rows(10), 0..4);
    }

    #[test]
    fn test_tall_element_aligns_top() {
        let mut vp = Viewport::new(10);
        assert!(vp.scroll_into_view(15, 40));
        assert_eq!(vp.offset, 15);
    }

    #[test]
    fn test_set_height_keeps_anchor() {
        let mut vp = Viewport::new(10);
        vp.ensure_row_visible(9);
        vp.set_height(4, Some(9));
        assert_eq!(vp.offset, 6);
    }

    #[test]
    fn test_visible_rows_clamped() {
        let vp = Viewport::new(10);
        assert_eq!(vp.visible_rows(3), 0..3);
        assert_eq!(vp.visible_rows(0), 0..0);
    }
}
