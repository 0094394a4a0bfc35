//! Fuzzy matching and result mapping
//!
//! The [`engine`] module is the boundary to the fuzzy matcher: it turns an
//! item list and a query into ranked raw matches. The [`mapper`] module turns
//! each raw match into a [`MappedResult`] whose segments concatenate back to
//! the item name and mark which parts matched.
//!
//! ```
//! use pickr::item::Item;
//! use pickr::matching::{FuzzyEngine, NucleoEngine, map_raw};
//!
//! let items = vec![Item::new("1", "apple"), Item::new("2", "banana")];
//! let mut engine = NucleoEngine::default();
//!
//! let results: Vec<_> = engine
//!     .search(&items, "ap")
//!     .iter()
//!     .filter_map(|raw| map_raw(&items, raw))
//!     .collect();
//!
//! assert_eq!(results[0].item.id, "1");
//! assert_eq!(results[0].segments[0].text, "ap");
//! ```

pub mod engine;
pub mod mapper;

pub use engine::{CaseMode, FuzzyEngine, MatchOptions, MatchRange, NucleoEngine, RawMatch};
pub use mapper::{MappedResult, Segment, confidence, map_match, map_raw, segments};
