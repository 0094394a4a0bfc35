//! Key dispatch table
//!
//! Keys map to [`PickerAction`]s through a static default table. Extra
//! bindings use the `key:action` format (for example `ctrl-t:next`) and
//! replace entries of the default table for the same key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Controller operation triggered by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerAction {
    /// Highlight the previous result, wrapping around
    Previous,
    /// Highlight the next result, wrapping around
    Next,
    /// Choose the highlighted result
    Commit,
    /// Close the picker
    Dismiss,
}

impl PickerAction {
    /// Name used in bind strings
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Commit => "commit",
            Self::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for PickerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "previous" | "prev" | "up" => Ok(Self::Previous),
            "next" | "down" => Ok(Self::Next),
            "commit" | "accept" => Ok(Self::Commit),
            "dismiss" | "abort" => Ok(Self::Dismiss),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

const DEFAULT_BINDS: &[(KeyCode, KeyModifiers, PickerAction)] = &[
    (KeyCode::Up, KeyModifiers::NONE, PickerAction::Previous),
    (KeyCode::Char('k'), KeyModifiers::CONTROL, PickerAction::Previous),
    (KeyCode::Char('p'), KeyModifiers::CONTROL, PickerAction::Previous),
    (KeyCode::BackTab, KeyModifiers::SHIFT, PickerAction::Previous),
    (KeyCode::Down, KeyModifiers::NONE, PickerAction::Next),
    (KeyCode::Char('j'), KeyModifiers::CONTROL, PickerAction::Next),
    (KeyCode::Char('n'), KeyModifiers::CONTROL, PickerAction::Next),
    (KeyCode::Tab, KeyModifiers::NONE, PickerAction::Next),
    (KeyCode::Enter, KeyModifiers::NONE, PickerAction::Commit),
    (KeyCode::Esc, KeyModifiers::NONE, PickerAction::Dismiss),
    (KeyCode::Char('c'), KeyModifiers::CONTROL, PickerAction::Dismiss),
];

/// Lookup table from keys to picker actions
#[derive(Debug, Clone)]
pub struct Keymap {
    binds: HashMap<(KeyCode, KeyModifiers), PickerAction>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            binds: DEFAULT_BINDS
                .iter()
                .map(|&(code, modifiers, action)| ((code, modifiers), action))
                .collect(),
        }
    }
}

impl Keymap {
    /// Default table extended with `key:action` binds
    ///
    /// Malformed binds are skipped with a warning.
    #[must_use]
    pub fn with_binds(binds: &[String]) -> Self {
        let mut keymap = Self::default();
        for bind in binds {
            if let Err(e) = keymap.bind(bind) {
                log::warn!("ignoring key bind {bind:?}: {e}");
            }
        }
        keymap
    }

    /// Add or replace a binding from a `key:action` string
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the key or action is not
    /// recognized.
    pub fn bind(&mut self, bind: &str) -> Result<(), String> {
        let (key_str, action_str) = bind
            .split_once(':')
            .ok_or_else(|| "expected key:action".to_string())?;
        let key = parse_key(key_str).ok_or_else(|| format!("unknown key: {key_str}"))?;
        let action = action_str.parse::<PickerAction>()?;

        log::debug!("binding {key_str} to {action}");
        self.binds.insert(key, action);
        Ok(())
    }

    /// Action bound to a key event, if any
    #[must_use]
    pub fn action(&self, key: &KeyEvent) -> Option<PickerAction> {
        self.binds.get(&(key.code, key.modifiers)).copied()
    }

    /// Number of bound keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    /// Whether no keys are bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }
}

/// Parse a key string like `ctrl-t` or `f2`
///
/// With `shift` a letter is stored uppercase, the way terminals report it.
#[must_use]
pub fn parse_key(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let parts: Vec<&str> = s.split('-').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = parts.last()?;

    for part in &parts[..parts.len().saturating_sub(1)] {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "btab" | "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        s if s.starts_with('f') && s.len() > 1 => s[1..].parse().ok().map(KeyCode::F)?,
        _ if key_part.chars().count() == 1 => {
            let c = key_part.chars().next()?;
            if modifiers.contains(KeyModifiers::SHIFT) {
                KeyCode::Char(c.to_uppercase().next().unwrap_or(c))
            } else {
                KeyCode::Char(c)
            }
        }
        _ => return None,
    };

    Some((code, modifiers))
}
