//! Selection state machine
//!
//! [`Picker`] owns the query, the highlighted item and the displayed result
//! list. Every mutating operation recomputes what it must synchronously and
//! then notifies subscribed listeners; nothing is recomputed lazily.

use super::events::{PickerEvent, PointerEvent};
use super::keymap::PickerAction;
use super::viewport::Viewport;
use crate::item::Item;
use crate::matching::{FuzzyEngine, MappedResult, NucleoEngine, map_raw};

/// Called with the chosen item
pub type ChooseCallback = Box<dyn FnMut(&Item)>;
/// Called when the picker is dismissed
pub type EscapeCallback = Box<dyn FnMut()>;
/// Receives every [`PickerEvent`]
pub type Listener = Box<dyn FnMut(&PickerEvent)>;

/// Caller-supplied reactions to choosing and dismissing
#[derive(Default)]
pub struct Callbacks {
    on_choose: Option<ChooseCallback>,
    on_escape: Option<EscapeCallback>,
}

impl Callbacks {
    /// No callbacks
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback invoked with the chosen item
    #[must_use]
    pub fn on_choose(mut self, f: impl FnMut(&Item) + 'static) -> Self {
        self.on_choose = Some(Box::new(f));
        self
    }

    /// Set the callback invoked on dismissal
    #[must_use]
    pub fn on_escape(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_escape = Some(Box::new(f));
        self
    }
}

/// Behavior switches for the picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickerOptions {
    /// Dismiss right after an item is chosen
    pub close_on_choose: bool,
}

/// Direction of keyboard navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the list
    Previous,
    /// Towards the bottom of the list
    Next,
}

impl Direction {
    const fn delta(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Query text and highlighted item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Current query
    pub query: String,
    /// Id of the highlighted item, always one of the displayed results
    pub highlighted_id: Option<String>,
}

/// Compute the displayed results for `query`
///
/// The engine's matches are mapped into segments, best first. A blank query
/// matches nothing.
pub fn recompute<E: FuzzyEngine + ?Sized>(
    items: &[Item],
    engine: &mut E,
    query: &str,
) -> Vec<MappedResult> {
    engine
        .search(items, query)
        .iter()
        .filter_map(|raw| map_raw(items, raw))
        .collect()
}

/// Search-and-select controller
pub struct Picker<E: FuzzyEngine = NucleoEngine> {
    items: Vec<Item>,
    engine: E,
    state: SelectionState,
    results: Vec<MappedResult>,
    viewport: Viewport,
    options: PickerOptions,
    callbacks: Callbacks,
    listeners: Vec<Listener>,
}

impl Picker<NucleoEngine> {
    /// Create a picker using the default nucleo engine
    #[must_use]
    pub fn with_default_engine(items: Vec<Item>) -> Self {
        Self::new(items, NucleoEngine::default())
    }
}

impl<E: FuzzyEngine> Picker<E> {
    /// Create a picker over `items`
    ///
    /// Every item is listed unranked until the first [`Picker::set_query`].
    /// Nothing is highlighted until [`Picker::mount`] is called.
    #[must_use]
    pub fn new(items: Vec<Item>, engine: E) -> Self {
        let results = items.iter().map(MappedResult::unranked).collect();
        Self {
            items,
            engine,
            state: SelectionState::default(),
            results,
            viewport: Viewport::default(),
            options: PickerOptions::default(),
            callbacks: Callbacks::default(),
            listeners: Vec::new(),
        }
    }

    /// Set behavior options
    #[must_use]
    pub const fn with_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Set choose and dismiss callbacks
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Set the viewport used for scroll-into-view
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Register a listener for state changes
    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Highlight the first item if nothing is highlighted yet
    pub fn mount(&mut self) {
        if self.state.highlighted_id.is_some() {
            return;
        }
        if let Some(first) = self.results.first() {
            self.state.highlighted_id = Some(first.item.id.clone());
            let id = self.state.highlighted_id.clone();
            self.notify(&PickerEvent::HighlightChanged(id));
        }
    }

    /// Replace the query and recompute the results
    ///
    /// The highlight always moves to the top result, even if the previously
    /// highlighted item still matches. A blank query empties the results.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
        self.results = recompute(&self.items, &mut self.engine, &self.state.query);

        log::debug!(
            "query {:?}: {} results",
            self.state.query,
            self.results.len()
        );

        self.notify(&PickerEvent::ResultsChanged);
        self.highlight_top();
    }

    /// Highlight the result with `id`, scrolling it into view
    ///
    /// Returns `false` without changing anything if no displayed result has
    /// that id.
    pub fn set_highlighted(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            log::debug!("ignoring highlight of unknown id {id:?}");
            return false;
        };

        self.state.highlighted_id = Some(id.to_string());
        self.notify(&PickerEvent::HighlightChanged(Some(id.to_string())));

        if self.viewport.ensure_row_visible(index) {
            let offset = self.viewport.offset;
            self.notify(&PickerEvent::ScrolledIntoView { offset });
        }
        self.notify(&PickerEvent::FocusInput);
        true
    }

    /// Move the highlight one result up or down, wrapping at the ends
    pub fn navigate(&mut self, direction: Direction) {
        let count = self.results.len();
        if count == 0 {
            return;
        }

        let index = self
            .highlighted_index()
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1);
        let Ok(count_signed) = isize::try_from(count) else {
            return;
        };
        let next = (index + direction.delta()).rem_euclid(count_signed);

        let id = self.results[next.unsigned_abs()].item.id.clone();
        self.set_highlighted(&id);
    }

    /// Choose the highlighted result
    pub fn commit(&mut self) {
        let Some(item) = self.highlighted().map(|r| r.item.clone()) else {
            return;
        };
        self.choose_item(&item);
    }

    /// Highlight and choose the result with `id` directly
    pub fn choose(&mut self, id: &str) {
        if self.set_highlighted(id) {
            self.commit();
        }
    }

    /// Close the picker
    pub fn dismiss(&mut self) {
        self.notify(&PickerEvent::Dismissed);
        if let Some(on_escape) = self.callbacks.on_escape.as_mut() {
            on_escape();
        }
    }

    /// Run the operation bound to a key
    pub fn apply(&mut self, action: PickerAction) {
        match action {
            PickerAction::Previous => self.navigate(Direction::Previous),
            PickerAction::Next => self.navigate(Direction::Next),
            PickerAction::Commit => self.commit(),
            PickerAction::Dismiss => self.dismiss(),
        }
    }

    /// Handle a pointer interaction with the list
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Click(id) => {
                self.set_highlighted(&id);
            }
            PointerEvent::DoubleClick(id) => self.choose(&id),
            PointerEvent::ScrollUp => self.navigate(Direction::Previous),
            PointerEvent::ScrollDown => self.navigate(Direction::Next),
        }
    }

    /// Resize the visible area, keeping the highlight in view
    pub fn set_viewport_height(&mut self, height: usize) {
        let anchor = self.highlighted_index();
        self.viewport.set_height(height, anchor);
    }

    /// All items, in caller order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Displayed results, best first
    #[must_use]
    pub fn results(&self) -> &[MappedResult] {
        &self.results
    }

    /// Current query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.state.query
    }

    /// Query and highlight together
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Current scroll window
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Behavior options
    #[must_use]
    pub const fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Id of the highlighted item
    #[must_use]
    pub fn highlighted_id(&self) -> Option<&str> {
        self.state.highlighted_id.as_deref()
    }

    /// Position of the highlighted item in the results
    #[must_use]
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted_id().and_then(|id| self.index_of(id))
    }

    /// The highlighted result
    #[must_use]
    pub fn highlighted(&self) -> Option<&MappedResult> {
        self.highlighted_index().map(|i| &self.results[i])
    }

    /// Move the highlight to the first result and the viewport to the top
    fn highlight_top(&mut self) {
        let scrolled = self.viewport.offset != 0;
        self.viewport.reset();

        let Some(id) = self.results.first().map(|r| r.item.id.clone()) else {
            self.state.highlighted_id = None;
            self.notify(&PickerEvent::HighlightChanged(None));
            return;
        };

        self.state.highlighted_id = Some(id.clone());
        self.notify(&PickerEvent::HighlightChanged(Some(id)));
        if scrolled {
            self.notify(&PickerEvent::ScrolledIntoView { offset: 0 });
        }
        self.notify(&PickerEvent::FocusInput);
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.results.iter().position(|r| r.item.id == id)
    }

    fn choose_item(&mut self, item: &Item) {
        log::debug!("chose {:?}", item.id);
        self.notify(&PickerEvent::Chosen(item.id.clone()));
        if let Some(on_choose) = self.callbacks.on_choose.as_mut() {
            on_choose(item);
        }
        if self.options.close_on_choose {
            self.dismiss();
        }
    }

    fn notify(&mut self, event: &PickerEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
