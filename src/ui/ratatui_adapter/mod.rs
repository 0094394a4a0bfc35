//! Ratatui-based picker front end
//!
//! Draws a [`crate::picker::Picker`] in the terminal and feeds it crossterm
//! key and mouse events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           RatatuiPicker                     │
//! │  (event loop, drawn on stderr)              │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │   Picker   │ │  Ratatui  │ │ Crossterm │
//! │  (state)   │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```

mod events;
mod finder;
mod state;
mod theme;
pub mod widgets;

pub use events::{EventResult, handle_key, handle_mouse};
pub use finder::{PickOutcome, RatatuiPicker};
pub use state::{ClickTracker, DOUBLE_CLICK_WINDOW, QueryInput};
pub use theme::Theme;
pub use widgets::ItemRenderer;
