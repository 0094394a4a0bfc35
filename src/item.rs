//! Candidate items offered by the picker
//!
//! Items are owned by the caller and never mutated by the picker. Each item
//! has a unique `id`, a display `name`, and optional keywords that are
//! searched alongside the name.

use serde::{Deserialize, Serialize};

/// A selectable candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: String,
    /// Text shown to the user and highlighted on match
    pub name: String,
    /// Extra searchable text that is never displayed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// The field of an item a match was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// The display name
    Name,
    /// One of the keywords, by position
    Keyword(usize),
}

impl Item {
    /// Create an item without keywords
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keywords: Vec::new(),
        }
    }

    /// Attach searchable keywords
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Get the text of a field, if the item has it
    #[must_use]
    pub fn field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => Some(self.name.as_str()),
            SearchField::Keyword(idx) => self.keywords.get(idx).map(String::as_str),
        }
    }

    /// Iterate over every searchable field, name first
    pub fn fields(&self) -> impl Iterator<Item = (SearchField, &str)> {
        std::iter::once((SearchField::Name, self.name.as_str())).chain(
            self.keywords
                .iter()
                .enumerate()
                .map(|(idx, kw)| (SearchField::Keyword(idx), kw.as_str())),
        )
    }
}

/// Parse items from plain text, one per line
///
/// A line of the form `id<TAB>name` yields that id and name; any other line
/// is used as both. Blank lines are skipped.
#[must_use]
pub fn parse_lines(input: &str) -> Vec<Item> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((id, name)) => Item::new(id, name),
            None => Item::new(line, line),
        })
        .collect()
}
