//! Ratatui-based picker front end
//!
//! Drives a [`Picker`] from crossterm events and draws it with ratatui.
//! The TUI is drawn on stderr so chosen ids can be piped from stdout.

use super::events::{EventResult, handle_key, handle_mouse};
use super::state::{ClickTracker, QueryInput};
use super::theme::Theme;
use super::widgets::{HelpBar, ItemList, ItemRenderer, KeyHint, SearchBar};
use crate::item::Item;
use crate::matching::{FuzzyEngine, Segment};
use crate::picker::{Keymap, Picker, PickerEvent};
use crate::ui::error::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders},
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::io::{self, Stderr};
use std::rc::Rc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the user picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickOutcome {
    /// Chosen items in the order they were chosen
    pub chosen: Vec<Item>,
    /// The picker was closed without choosing anything
    pub aborted: bool,
}

/// Choices and dismissal observed through the picker's listener
#[derive(Debug, Default)]
struct Signals {
    chosen: Vec<String>,
    dismissed: bool,
}

/// Interactive terminal picker
pub struct RatatuiPicker {
    theme: Theme,
    keymap: Keymap,
    prompt: String,
    mouse: bool,
    show_search: bool,
    renderer: Option<Box<ItemRenderer>>,
}

impl RatatuiPicker {
    /// Create a picker front end with default theme and key binds
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            keymap: Keymap::default(),
            prompt: ">".to_string(),
            mouse: true,
            show_search: true,
            renderer: None,
        }
    }

    /// Set custom theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set key binds
    #[must_use]
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Set the prompt shown before the query
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable or disable mouse capture
    #[must_use]
    pub const fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    /// Show or hide the search bar
    ///
    /// A hidden search bar also stops typed text from reaching the query.
    /// An initial query passed to [`RatatuiPicker::run`] still applies.
    #[must_use]
    pub const fn with_search(mut self, show_search: bool) -> Self {
        self.show_search = show_search;
        self
    }

    /// Render item rows with a custom function
    #[must_use]
    pub fn with_renderer(
        mut self,
        renderer: impl Fn(&Item, Option<&[Segment]>) -> Line<'static> + 'static,
    ) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Setup terminal for TUI
    ///
    /// Raw mode is switched back off if a later step fails.
    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stderr>>> {
        enable_raw_mode()?;
        restore_on_error(self.enter_screen(), || self.cleanup_terminal())
    }

    fn enter_screen(&self) -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen)?;
        if self.mouse {
            execute!(stderr, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stderr);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal(&self) -> Result<()> {
        disable_raw_mode()?;
        let mut stderr = io::stderr();
        if self.mouse {
            execute!(stderr, DisableMouseCapture)?;
        }
        execute!(stderr, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run the picker until it is dismissed
    ///
    /// In single-choice mode (`close_on_choose`) the first choice dismisses
    /// the picker. Otherwise choices accumulate until the user dismisses it.
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be set up or drawn to.
    pub fn run<E: FuzzyEngine>(&self, picker: Picker<E>, initial_query: &str) -> Result<PickOutcome> {
        let mut terminal = self.setup_terminal()?;

        let result = self.run_loop(&mut terminal, picker, initial_query);

        // Cleanup terminal (always, even on error)
        if let Err(e) = self.cleanup_terminal() {
            log::warn!("terminal cleanup failed: {e}");
        }

        result
    }

    fn run_loop<E: FuzzyEngine>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        mut picker: Picker<E>,
        initial_query: &str,
    ) -> Result<PickOutcome> {
        let signals = Rc::new(RefCell::new(Signals::default()));
        let sink = Rc::clone(&signals);
        picker.subscribe(move |event| {
            let mut signals = sink.borrow_mut();
            match event {
                PickerEvent::Chosen(id) if !signals.chosen.contains(id) => {
                    signals.chosen.push(id.clone());
                }
                PickerEvent::Dismissed => signals.dismissed = true,
                _ => {}
            }
        });

        let mut input = QueryInput::new(initial_query);
        picker.mount();
        if !initial_query.is_empty() {
            picker.set_query(initial_query);
        }

        let hints = HelpBar::default_hints(picker.options().close_on_choose);
        let mut clicks = ClickTracker::default();
        let mut list_area = Rect::default();

        while !signals.borrow().dismissed {
            let chosen: HashSet<String> = signals.borrow().chosen.iter().cloned().collect();
            terminal.draw(|frame| {
                list_area = self.render(frame, &mut picker, &input, &chosen, &hints);
            })?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let result = match event::read()? {
                Event::Key(key) => {
                    let editable = self.show_search.then_some(&mut input);
                    handle_key(&mut picker, editable, &self.keymap, key)
                }
                Event::Mouse(mouse) if self.mouse => {
                    handle_mouse(&mut picker, &mut clicks, list_area, mouse)
                }
                Event::Resize(width, height) => {
                    log::debug!("terminal resized to {width}x{height}");
                    EventResult::Continue
                }
                _ => EventResult::Ignored,
            };
            if result == EventResult::QueryChanged {
                log::trace!("{} results for {:?}", picker.results().len(), picker.query());
            }
        }

        let ids = std::mem::take(&mut signals.borrow_mut().chosen);
        let chosen: Vec<Item> = ids
            .iter()
            .filter_map(|id| picker.items().iter().find(|item| &item.id == id).cloned())
            .collect();

        Ok(PickOutcome {
            aborted: chosen.is_empty(),
            chosen,
        })
    }

    /// Draw one frame and return the inner area of the item list
    fn render<E: FuzzyEngine>(
        &self,
        frame: &mut Frame,
        picker: &mut Picker<E>,
        input: &QueryInput,
        chosen: &HashSet<String>,
        hints: &[KeyHint],
    ) -> Rect {
        let mut constraints = Vec::with_capacity(3);
        if self.show_search {
            constraints.push(Constraint::Length(3)); // Search bar
        }
        constraints.push(Constraint::Min(3)); // Results
        constraints.push(Constraint::Length(1)); // Help bar

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());
        let (list_area, help_area) = if self.show_search {
            (layout[1], layout[2])
        } else {
            (layout[0], layout[1])
        };

        let list_inner = Block::default().borders(Borders::ALL).inner(list_area);
        picker.set_viewport_height(usize::from(list_inner.height));

        if self.show_search {
            let search_bar =
                SearchBar::new(input.text(), input.cursor(), &self.prompt, &self.theme)
                    .counts(picker.results().len(), picker.items().len());
            frame.render_widget(search_bar, layout[0]);
        }

        let visible = picker.viewport().visible_rows(picker.results().len());
        let item_list = ItemList::new(picker.results(), visible, chosen, &self.theme)
            .highlighted(picker.highlighted_index())
            .ranked(!picker.query().trim().is_empty())
            .renderer(self.renderer.as_deref());
        frame.render_widget(item_list, list_area);

        frame.render_widget(HelpBar::new(hints, &self.theme), help_area);

        list_inner
    }
}

impl Default for RatatuiPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `restore` when `result` is an error, then hand the result back
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err()
        && let Err(e) = restore()
    {
        log::warn!("terminal restore failed: {e}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiError;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use std::cell::Cell;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn make_picker() -> Picker {
        let items = vec![
            Item::new("1", "Open File"),
            Item::new("2", "Save File"),
            Item::new("3", "Close Window"),
        ];
        Picker::with_default_engine(items)
    }

    #[test]
    fn test_render_layout() {
        let finder = RatatuiPicker::new().with_prompt("run>");
        let mut picker = make_picker();
        picker.mount();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let hints = HelpBar::default_hints(true);

        let mut list_area = Rect::default();
        terminal
            .draw(|frame| {
                list_area = finder.render(
                    frame,
                    &mut picker,
                    &QueryInput::default(),
                    &HashSet::new(),
                    &hints,
                );
            })
            .unwrap();

        assert_eq!(list_area, Rect::new(1, 4, 38, 4));
        assert_eq!(picker.viewport().height, 4);

        let lines = screen(&terminal);
        assert!(lines[0].contains("Search (3/3)"));
        assert!(lines[1].contains("run>"));
        assert!(lines[4].contains("> ") && lines[4].contains("Open File"));
        assert!(lines[6].contains("Close Window"));
        assert!(lines[9].contains("navigate"));
    }

    #[test]
    fn test_render_filtered_counts() {
        let finder = RatatuiPicker::new();
        let mut picker = make_picker();
        picker.set_query("save");
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| {
                finder.render(
                    frame,
                    &mut picker,
                    &QueryInput::new("save"),
                    &HashSet::new(),
                    &[],
                );
            })
            .unwrap();

        let lines = screen(&terminal);
        assert!(lines[0].contains("Search (1/3)"));
        assert!(lines[4].contains("Save File"));
    }

    #[test]
    fn test_render_without_search_bar() {
        let finder = RatatuiPicker::new().with_search(false);
        let mut picker = make_picker();
        picker.mount();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let hints = HelpBar::default_hints(true);

        let mut list_area = Rect::default();
        terminal
            .draw(|frame| {
                list_area = finder.render(
                    frame,
                    &mut picker,
                    &QueryInput::default(),
                    &HashSet::new(),
                    &hints,
                );
            })
            .unwrap();

        assert_eq!(list_area, Rect::new(1, 1, 38, 7));
        assert_eq!(picker.viewport().height, 7);

        let lines = screen(&terminal);
        assert!(lines.iter().all(|line| !line.contains("Search")));
        assert!(lines[1].contains("Open File"));
        assert!(lines[9].contains("navigate"));
    }

    #[test]
    fn test_render_light_theme() {
        let finder = RatatuiPicker::new().with_theme(Theme::light());
        let mut picker = make_picker();
        picker.mount();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| {
                finder.render(
                    frame,
                    &mut picker,
                    &QueryInput::default(),
                    &HashSet::new(),
                    &[],
                );
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let x = (0..buf.area.width).find(|&x| buf[(x, 4)].symbol() == "O").unwrap();
        assert_eq!(buf[(x, 4)].bg, Color::LightBlue);
    }

    #[test]
    fn test_restore_runs_only_on_error() {
        let restored = Cell::new(false);
        let ok: Result<u8> = restore_on_error(Ok(1), || {
            restored.set(true);
            Ok(())
        });
        assert_eq!(ok.unwrap(), 1);
        assert!(!restored.get());

        let failed: Result<u8> = restore_on_error(
            Err(UiError::IoError(io::Error::other("no tty"))),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(failed.is_err());
        assert!(restored.get());

        // A failing restore does not replace the original error
        let failed: Result<u8> = restore_on_error(
            Err(UiError::IoError(io::Error::other("no tty"))),
            || Err(UiError::IoError(io::Error::other("restore"))),
        );
        assert!(failed.unwrap_err().to_string().contains("no tty"));
    }
}
