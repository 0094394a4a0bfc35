//! Presentation layer
//!
//! The picker itself is presentation-agnostic; this module holds the two
//! ways pickr puts it in front of a user:
//!
//! - **`ratatui_adapter`** - interactive TUI driven by crossterm events
//! - **`output`** - plain text or JSON for non-interactive filter mode
//!
//! # Example
//!
//! ```no_run
//! use pickr::item::Item;
//! use pickr::picker::Picker;
//! use pickr::ui::RatatuiPicker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let items = vec![Item::new("1", "Open File"), Item::new("2", "Save File")];
//! let picker = Picker::with_default_engine(items);
//!
//! let outcome = RatatuiPicker::new().with_prompt("run>").run(picker, "")?;
//! for item in &outcome.chosen {
//!     println!("{}", item.id);
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use ratatui_adapter::{PickOutcome, RatatuiPicker, Theme};
