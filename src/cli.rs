//! Command-line interface definitions and parsing
//!
//! This module defines the `pickr` command line using `clap`, folds the
//! flags into the loaded [`PickrConfig`], and reads candidate items.
//!
//! # Modes
//!
//! - **interactive** (default): open the TUI and print the chosen ids
//! - **filter** (`--filter QUERY`): print ranked results and exit
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use pickr::cli::Cli;
//! use pickr::config::PickrConfig;
//!
//! let cli = Cli::parse_from(["pickr", "--threshold", "0.5", "--multi"]);
//! let mut config = PickrConfig::default();
//! cli.apply_to(&mut config);
//! assert!(!config.picker.close_on_choose);
//! ```

use crate::PickrError;
use crate::config::{PickrConfig, ThemeName};
use crate::item::{Item, parse_lines};
use crate::matching::CaseMode;
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

/// Case sensitivity flag values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseArg {
    /// Case-insensitive unless the query has uppercase letters
    Smart,
    /// Always case-insensitive
    Ignore,
    /// Always case-sensitive
    Respect,
}

impl From<CaseArg> for CaseMode {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Smart => Self::Smart,
            CaseArg::Ignore => Self::Ignore,
            CaseArg::Respect => Self::Respect,
        }
    }
}

/// Color theme flag values
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    /// For dark terminal backgrounds
    Dark,
    /// For light terminal backgrounds
    Light,
}

impl From<ThemeArg> for ThemeName {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

/// Output format for filter mode
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated id, name and confidence
    #[default]
    Text,
    /// JSON array of results with segments
    Json,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pickr")]
#[command(about = "Fuzzy pick items from a list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read items from FILE instead of stdin
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Input is a JSON array of `{id, name, keywords}` objects
    #[arg(long = "json")]
    pub json: bool,

    /// Initial query
    #[arg(short = 'q', long = "query", value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Prompt shown before the query (overrides config)
    #[arg(long = "prompt", value_name = "PROMPT")]
    pub prompt: Option<String>,

    /// Drop matches whose distance exceeds this value, 0 to 1 (overrides config)
    #[arg(long = "threshold", value_name = "F")]
    pub threshold: Option<f64>,

    /// Ignore matched runs shorter than N characters (overrides config)
    #[arg(long = "min-match-len", value_name = "N")]
    pub min_match_len: Option<usize>,

    /// Case sensitivity (overrides config)
    #[arg(long = "case", value_enum)]
    pub case: Option<CaseArg>,

    /// Tune scoring for file paths
    #[arg(long = "paths")]
    pub paths: bool,

    /// Search names only, not keywords
    #[arg(long = "no-keywords")]
    pub no_keywords: bool,

    /// Keep the picker open and collect several choices
    #[arg(short = 'm', long = "multi")]
    pub multi: bool,

    /// Disable mouse support
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,

    /// Hide the search bar; typing no longer edits the query
    #[arg(long = "no-search")]
    pub no_search: bool,

    /// Color theme (overrides config)
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Print ranked results for QUERY without opening the picker
    #[arg(short = 'f', long = "filter", value_name = "QUERY")]
    pub filter: Option<String>,

    /// Output format for --filter
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Extra key bind, e.g. `ctrl-t:next` (repeatable)
    #[arg(long = "bind", value_name = "KEY:ACTION")]
    pub bind: Vec<String>,

    /// Use this config file instead of the default location
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load the config file named by `--config`, or the default one
    ///
    /// # Errors
    ///
    /// Returns `PickrError::ConfigError` if the file cannot be read or parsed.
    pub fn load_config(&self) -> Result<PickrConfig, PickrError> {
        let config = match &self.config {
            Some(path) => PickrConfig::load_from(path)?,
            None => PickrConfig::load()?,
        };
        Ok(config)
    }

    /// Override config values with flags given on the command line
    pub fn apply_to(&self, config: &mut PickrConfig) {
        if let Some(prompt) = &self.prompt {
            config.picker.prompt.clone_from(prompt);
        }
        if let Some(threshold) = self.threshold {
            config.matching.threshold = threshold;
        }
        if let Some(min_match_len) = self.min_match_len {
            config.matching.min_match_len = min_match_len;
        }
        if let Some(case) = self.case {
            config.matching.case_matching = case.into();
        }
        if self.paths {
            config.matching.match_paths = true;
        }
        if self.no_keywords {
            config.matching.search_keywords = false;
        }
        if self.multi {
            config.picker.close_on_choose = false;
        }
        if self.no_mouse {
            config.picker.mouse = false;
        }
        if self.no_search {
            config.picker.show_search = false;
        }
        if let Some(theme) = self.theme {
            config.picker.theme = theme.into();
        }
        config.bind.extend(self.bind.iter().cloned());
    }

    /// Validate flag values that clap cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns `PickrError::InvalidInput` for an out-of-range threshold.
    pub fn validate(&self) -> Result<(), PickrError> {
        if let Some(threshold) = self.threshold
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(PickrError::InvalidInput(format!(
                "--threshold must be between 0 and 1, got {threshold}"
            )));
        }
        Ok(())
    }

    /// Read candidate items from the input file or stdin
    ///
    /// # Errors
    ///
    /// Returns `PickrError` if the input cannot be read or parsed, or if two
    /// items share an id.
    pub fn read_items(&self) -> Result<Vec<Item>, PickrError> {
        let input = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        parse_items(&input, self.json)
    }
}

/// Parse items from text lines or a JSON array
///
/// # Errors
///
/// Returns `PickrError` if the JSON is malformed or two items share an id.
pub fn parse_items(input: &str, json: bool) -> Result<Vec<Item>, PickrError> {
    let items = if json {
        serde_json::from_str::<Vec<Item>>(input)?
    } else {
        parse_lines(input)
    };

    let mut seen = HashSet::new();
    if let Some(dup) = items.iter().find(|item| !seen.insert(item.id.as_str())) {
        return Err(PickrError::InvalidInput(format!(
            "duplicate item id {:?}",
            dup.id
        )));
    }

    log::debug!("read {} items", items.len());
    Ok(items)
}
