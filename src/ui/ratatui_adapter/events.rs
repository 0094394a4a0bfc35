//! Event handling for the ratatui TUI
//!
//! Handles keyboard and mouse events, mapping them to picker operations.
//! Bound keys go through the [`Keymap`]; everything else edits the query.

use super::state::{ClickTracker, QueryInput};
use crate::matching::FuzzyEngine;
use crate::picker::{Keymap, Picker, PointerEvent};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Picker state may have changed
    Continue,
    /// Query text changed, results need recomputing
    QueryChanged,
    /// No action taken
    Ignored,
}

/// Handle a key press
///
/// Without an `input` the query is read-only and only bound keys act.
pub fn handle_key<E: FuzzyEngine>(
    picker: &mut Picker<E>,
    input: Option<&mut QueryInput>,
    keymap: &Keymap,
    key: KeyEvent,
) -> EventResult {
    if key.kind != KeyEventKind::Press {
        return EventResult::Ignored;
    }

    if let Some(action) = keymap.action(&key) {
        log::debug!("key {:?} -> {action}", key.code);
        picker.apply(action);
        return EventResult::Continue;
    }

    let Some(input) = input else {
        return EventResult::Ignored;
    };

    let changed = match (key.code, key.modifiers) {
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            input.push(c);
            true
        }
        (KeyCode::Backspace, _) => input.backspace(),
        (KeyCode::Delete, _) => input.delete(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => input.clear(),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => input.delete_word(),
        (KeyCode::Left, _) => {
            input.cursor_left();
            return EventResult::Continue;
        }
        (KeyCode::Right, _) => {
            input.cursor_right();
            return EventResult::Continue;
        }
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
            input.cursor_home();
            return EventResult::Continue;
        }
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
            input.cursor_end();
            return EventResult::Continue;
        }
        _ => return EventResult::Ignored,
    };

    if changed {
        picker.set_query(input.text());
        EventResult::QueryChanged
    } else {
        EventResult::Ignored
    }
}

/// Handle a mouse event over the item list drawn in `list_area`
///
/// `list_area` is the inner area of the list, one row per result starting
/// at the viewport's first visible row.
pub fn handle_mouse<E: FuzzyEngine>(
    picker: &mut Picker<E>,
    clicks: &mut ClickTracker,
    list_area: Rect,
    mouse: MouseEvent,
) -> EventResult {
    let pointer = match mouse.kind {
        MouseEventKind::ScrollUp => PointerEvent::ScrollUp,
        MouseEventKind::ScrollDown => PointerEvent::ScrollDown,
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(id) = row_at(picker, list_area, mouse.column, mouse.row) else {
                return EventResult::Ignored;
            };
            if clicks.click(&id, Instant::now()) {
                PointerEvent::DoubleClick(id)
            } else {
                PointerEvent::Click(id)
            }
        }
        _ => return EventResult::Ignored,
    };

    picker.pointer(pointer);
    EventResult::Continue
}

/// Id of the result drawn at a screen position
fn row_at<E: FuzzyEngine>(picker: &Picker<E>, area: Rect, column: u16, row: u16) -> Option<String> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let first = picker.viewport().visible_rows(picker.results().len()).start;
    let index = first + usize::from(row - area.y);
    picker.results().get(index).map(|r| r.item.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::picker::Viewport;

    fn make_picker() -> Picker {
        let items: Vec<Item> = (0..10)
            .map(|i| Item::new(format!("item{i}"), format!("Item {i}")))
            .collect();
        let mut picker = Picker::with_default_engine(items).with_viewport(Viewport::new(5));
        picker.mount();
        picker
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn click_at(row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_keys() {
        let mut picker = make_picker();
        let mut input = QueryInput::default();
        let keymap = Keymap::default();

        let result = handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(picker.highlighted_id(), Some("item1"));

        handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Up, KeyModifiers::NONE));
        handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(picker.highlighted_id(), Some("item9"));
    }

    #[test]
    fn test_query_input() {
        let mut picker = make_picker();
        let mut input = QueryInput::default();
        let keymap = Keymap::default();

        let result = handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Char('7'), KeyModifiers::NONE));
        assert_eq!(result, EventResult::QueryChanged);
        assert_eq!(picker.query(), "7");
        assert_eq!(picker.highlighted_id(), Some("item7"));

        let result = handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(result, EventResult::QueryChanged);
        assert_eq!(picker.query(), "");
        assert!(picker.results().is_empty());
        assert_eq!(picker.highlighted_id(), None);

        let result = handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(result, EventResult::Ignored);
    }

    #[test]
    fn test_read_only_query_ignores_typing() {
        let mut picker = make_picker();
        let keymap = Keymap::default();

        let result = handle_key(&mut picker, None, &keymap, press(KeyCode::Char('7'), KeyModifiers::NONE));
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(picker.query(), "");
        assert_eq!(picker.results().len(), 10);

        let result = handle_key(&mut picker, None, &keymap, press(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(picker.highlighted_id(), Some("item1"));
    }

    #[test]
    fn test_shifted_bind_matches_uppercase_char() {
        let mut picker = make_picker();
        let mut input = QueryInput::default();
        let keymap = Keymap::with_binds(&["shift-j:next".to_string()]);

        let result = handle_key(&mut picker, Some(&mut input), &keymap, press(KeyCode::Char('J'), KeyModifiers::SHIFT));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(picker.highlighted_id(), Some("item1"));
        assert_eq!(picker.query(), "");
    }

    #[test]
    fn test_release_events_ignored() {
        let mut picker = make_picker();
        let mut input = QueryInput::default();
        let mut key = press(KeyCode::Down, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        let result = handle_key(&mut picker, Some(&mut input), &Keymap::default(), key);
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(picker.highlighted_id(), Some("item0"));
    }

    #[test]
    fn test_click_highlights_row_under_pointer() {
        let mut picker = make_picker();
        let mut clicks = ClickTracker::default();
        let area = Rect::new(1, 4, 30, 5);

        let result = handle_mouse(&mut picker, &mut clicks, area, click_at(6));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(picker.highlighted_id(), Some("item2"));

        // Outside the list
        let result = handle_mouse(&mut picker, &mut clicks, area, click_at(1));
        assert_eq!(result, EventResult::Ignored);
    }

    #[test]
    fn test_click_accounts_for_scroll() {
        let mut picker = make_picker();
        let mut clicks = ClickTracker::default();
        picker.set_highlighted("item8");
        assert_eq!(picker.viewport().offset, 4);

        handle_mouse(&mut picker, &mut clicks, Rect::new(0, 0, 30, 5), click_at(0));
        assert_eq!(picker.highlighted_id(), Some("item4"));
    }

    #[test]
    fn test_wheel_navigates() {
        let mut picker = make_picker();
        let mut clicks = ClickTracker::default();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut picker, &mut clicks, Rect::default(), wheel);
        assert_eq!(picker.highlighted_id(), Some("item1"));
    }
}
