//! Search-and-select controller
//!
//! The [`Picker`] holds the query and the highlighted item, recomputes the
//! displayed results whenever the query changes, and turns key and pointer
//! input into navigation, choosing and dismissal. It is front-end agnostic:
//! presentation layers read its results and subscribe to [`PickerEvent`]s.
//!
//! # State transitions
//!
//! | Input                 | Operation                      |
//! |-----------------------|--------------------------------|
//! | mount                 | [`Picker::mount`]              |
//! | text edit             | [`Picker::set_query`]          |
//! | Up / Down             | [`Picker::navigate`]           |
//! | Enter                 | [`Picker::commit`]             |
//! | Esc                   | [`Picker::dismiss`]            |
//! | click / double click  | [`Picker::pointer`]            |
//!
//! ```
//! use pickr::item::Item;
//! use pickr::picker::{Direction, Picker};
//!
//! let items = vec![
//!     Item::new("1", "apple"),
//!     Item::new("2", "banana"),
//!     Item::new("3", "grape"),
//! ];
//! let mut picker = Picker::with_default_engine(items);
//! picker.mount();
//! assert_eq!(picker.highlighted_id(), Some("1"));
//!
//! picker.navigate(Direction::Previous);
//! assert_eq!(picker.highlighted_id(), Some("3"));
//! ```

mod events;
mod keymap;
mod state;
mod viewport;

pub use events::{PickerEvent, PointerEvent};
pub use keymap::{Keymap, PickerAction, parse_key};
pub use state::{
    Callbacks, ChooseCallback, Direction, EscapeCallback, Listener, Picker, PickerOptions,
    SelectionState, recompute,
};
pub use viewport::Viewport;
