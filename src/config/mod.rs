//! Configuration module for pickr
//!
//! Matching options, picker behavior and extra key binds are read from
//! `config.toml` in the user's config directory (`~/.config/pickr/` on
//! Linux). A missing file means defaults; command-line flags override
//! whatever the file sets.
//!
//! ```toml
//! bind = ["ctrl-t:next"]
//!
//! [matching]
//! threshold = 0.6
//! min_match_len = 2
//! case_matching = "ignore"
//!
//! [picker]
//! prompt = "run>"
//! close_on_choose = true
//! show_search = true
//! theme = "light"
//! ```

use crate::matching::MatchOptions;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Built-in color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Bright text for dark terminals
    #[default]
    Dark,
    /// Dark text for light terminals
    Light,
}

/// Picker presentation and behavior settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PickerConfig {
    /// Prompt shown before the query
    pub prompt: String,
    /// Exit after the first choice instead of collecting several
    pub close_on_choose: bool,
    /// Capture mouse clicks and wheel events
    pub mouse: bool,
    /// Draw the search bar and let typing edit the query
    pub show_search: bool,
    /// Color theme
    pub theme: ThemeName,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            prompt: ">".to_string(),
            close_on_choose: true,
            mouse: true,
            show_search: true,
            theme: ThemeName::Dark,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PickrConfig {
    /// Extra key binds in `key:action` form
    #[serde(default)]
    pub bind: Vec<String>,

    /// Fuzzy matching options
    #[serde(default)]
    pub matching: MatchOptions,

    /// Picker settings
    #[serde(default)]
    pub picker: PickerConfig,
}

impl PickrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("pickr").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("loading config from {}", path.display());

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.matching.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Message(format!(
                "matching.threshold must be between 0 and 1, got {threshold}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::CaseMode;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = PickrConfig::default();
        assert!((config.matching.threshold - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.matching.min_match_len, 1);
        assert!(config.picker.close_on_choose);
        assert_eq!(config.picker.prompt, ">");
        assert!(config.picker.show_search);
        assert_eq!(config.picker.theme, ThemeName::Dark);
        assert!(config.bind.is_empty());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
bind = ["ctrl-t:next"]

[matching]
threshold = 0.4
case_matching = "ignore"

[picker]
prompt = "run>"
"#,
        );

        let config = PickrConfig::load_from(file.path()).unwrap();
        assert!((config.matching.threshold - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.matching.case_matching, CaseMode::Ignore);
        assert_eq!(config.matching.min_match_len, 1);
        assert!(config.matching.search_keywords);
        assert_eq!(config.picker.prompt, "run>");
        assert!(config.picker.close_on_choose);
        assert_eq!(config.bind, vec!["ctrl-t:next".to_string()]);
    }

    #[test]
    fn test_load_picker_presentation() {
        let file = write_config("[picker]\nshow_search = false\ntheme = \"light\"\n");
        let config = PickrConfig::load_from(file.path()).unwrap();
        assert!(!config.picker.show_search);
        assert_eq!(config.picker.theme, ThemeName::Light);
        assert!(config.picker.mouse);

        let file = write_config("[picker]\ntheme = \"neon\"\n");
        assert!(PickrConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let file = write_config("[matching]\nthreshold = 1.5\n");
        assert!(PickrConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = PickrConfig::default();
        config.picker.mouse = false;
        config.picker.theme = ThemeName::Light;
        config.bind.push("ctrl-n:next".into());

        let rendered = config.to_toml().unwrap();
        let file = write_config(&rendered);
        assert_eq!(PickrConfig::load_from(file.path()).unwrap(), config);
    }
}
