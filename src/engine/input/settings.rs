// Settings store backing the jump keybinds
//
// The controller never touches a global store: it is handed something that
// implements `SettingsProvider` and polls it on every pass, so edits made
// while a level is running take effect on the next frame.

use super::keybind::Keybind;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use winit::keyboard::KeyCode;

/// Keybind list for player 1
pub const JUMP_KEY_P1: &str = "jump-key";
/// Keybind list for player 2
pub const JUMP_KEY_P2: &str = "jump-key-p2";
/// Whether player 2 binds are honoured at all (absent means enabled)
pub const ENABLE_JUMP_KEY_P2: &str = "enable-jump-key-p2";
/// Whether a matched event is consumed instead of reaching the host (absent means propagate)
pub const STOP_KEYBIND_PROPAGATION: &str = "stop-keybind-propagation";

/// Errors from loading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the settings the controller depends on.
///
/// Both getters return `None` when the setting is absent *or* holds a value of
/// the wrong type; callers pick the default.
pub trait SettingsProvider {
    fn keybinds(&self, key: &str) -> Option<Vec<Keybind>>;

    fn flag(&self, key: &str) -> Option<bool>;
}

/// A single stored setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Keybinds(Vec<Keybind>),
    /// Anything we do not understand. Kept so a save round-trips, read as absent.
    Other(serde_json::Value),
}

/// In-memory settings with interior mutability, editable while a controller holds it
#[derive(Debug, Default)]
pub struct SettingsStore {
    values: RefCell<HashMap<String, SettingValue>>,
}

impl SettingsStore {
    /// Create an empty store (every setting absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the stock binds used by the demo
    pub fn with_defaults() -> Self {
        let store = Self::new();
        store.set_keybinds(JUMP_KEY_P1, vec![Keybind::key(KeyCode::Space)]);
        store.set_keybinds(JUMP_KEY_P2, vec![Keybind::key(KeyCode::ArrowUp)]);
        store.set_flag(ENABLE_JUMP_KEY_P2, true);
        store.set_flag(STOP_KEYBIND_PROPAGATION, false);
        store
    }

    /// Parse a store from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let values: HashMap<String, SettingValue> = serde_json::from_str(json)?;
        Ok(Self {
            values: RefCell::new(values),
        })
    }

    /// Load a store from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        log::info!(
            "Loaded {} setting(s) from {}",
            store.values.borrow().len(),
            path.display()
        );
        Ok(store)
    }

    /// Load a store, falling back to an empty one if the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(err) => {
                log::warn!(
                    "Could not load settings from {}: {}; using empty settings",
                    path.display(),
                    err
                );
                Self::new()
            }
        }
    }

    /// Serialize the store as pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(&*self.values.borrow())?)
    }

    pub fn set_keybinds(&self, key: &str, binds: Vec<Keybind>) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), SettingValue::Keybinds(binds));
    }

    pub fn set_flag(&self, key: &str, value: bool) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), SettingValue::Flag(value));
    }

    /// Remove a setting so it reads as absent
    pub fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl SettingsProvider for SettingsStore {
    fn keybinds(&self, key: &str) -> Option<Vec<Keybind>> {
        match self.values.borrow().get(key) {
            Some(SettingValue::Keybinds(binds)) => Some(binds.clone()),
            _ => None,
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match self.values.borrow().get(key) {
            Some(SettingValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::keybind::Modifiers;

    #[test]
    fn test_empty_store_reads_absent() {
        let store = SettingsStore::new();
        assert_eq!(store.keybinds(JUMP_KEY_P1), None);
        assert_eq!(store.flag(ENABLE_JUMP_KEY_P2), None);
    }

    #[test]
    fn test_set_and_remove() {
        let store = SettingsStore::new();
        store.set_keybinds(JUMP_KEY_P1, vec![Keybind::key(KeyCode::KeyZ)]);
        store.set_flag(STOP_KEYBIND_PROPAGATION, true);

        assert_eq!(
            store.keybinds(JUMP_KEY_P1),
            Some(vec![Keybind::key(KeyCode::KeyZ)])
        );
        assert_eq!(store.flag(STOP_KEYBIND_PROPAGATION), Some(true));

        store.remove(JUMP_KEY_P1);
        assert!(!store.contains(JUMP_KEY_P1));
        assert_eq!(store.keybinds(JUMP_KEY_P1), None);
    }

    #[test]
    fn test_wrong_type_reads_absent() {
        let store = SettingsStore::new();
        store.set_flag(JUMP_KEY_P1, true);
        store.set_keybinds(ENABLE_JUMP_KEY_P2, Vec::new());

        assert_eq!(store.keybinds(JUMP_KEY_P1), None);
        assert_eq!(store.flag(ENABLE_JUMP_KEY_P2), None);
    }

    #[test]
    fn test_from_json() {
        let store = SettingsStore::from_json(
            r#"{
                "jump-key": [{"key": "KeyZ"}, {"key": "KeyX", "modifiers": {"ctrl": true}}],
                "jump-key-p2": [],
                "enable-jump-key-p2": false
            }"#,
        )
        .unwrap();

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            store.keybinds(JUMP_KEY_P1),
            Some(vec![
                Keybind::key(KeyCode::KeyZ),
                Keybind::with_modifiers(KeyCode::KeyX, ctrl),
            ])
        );
        assert_eq!(store.keybinds(JUMP_KEY_P2), Some(Vec::new()));
        assert_eq!(store.flag(ENABLE_JUMP_KEY_P2), Some(false));
        assert_eq!(store.flag(STOP_KEYBIND_PROPAGATION), None);
    }

    #[test]
    fn test_malformed_entry_reads_absent() {
        let store = SettingsStore::from_json(
            r#"{"jump-key": "space", "stop-keybind-propagation": "yes"}"#,
        )
        .unwrap();

        assert!(store.contains(JUMP_KEY_P1));
        assert_eq!(store.keybinds(JUMP_KEY_P1), None);
        assert_eq!(store.flag(STOP_KEYBIND_PROPAGATION), None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = SettingsStore::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid settings JSON"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let store = SettingsStore::load_or_default(Path::new("/nonexistent/custom-jump.json"));
        assert_eq!(store.keybinds(JUMP_KEY_P1), None);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let store = SettingsStore::with_defaults();
        let json = store.to_json().unwrap();
        let reloaded = SettingsStore::from_json(&json).unwrap();

        assert_eq!(
            reloaded.keybinds(JUMP_KEY_P1),
            Some(vec![Keybind::key(KeyCode::Space)])
        );
        assert_eq!(reloaded.flag(ENABLE_JUMP_KEY_P2), Some(true));
    }
}
