//! Pickr - a fuzzy search-and-select picker
//!
//! This library provides a presentation-agnostic picker: a list of items,
//! a query, fuzzy-ranked results with highlighted match segments, and a
//! single highlighted entry that can be navigated and chosen. A ratatui
//! front end and a non-interactive filter output are included.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod item;
pub mod matching;
pub mod picker;
pub mod ui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PickrError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal or output error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Items could not be parsed as JSON
    #[error("Invalid JSON input: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
