// Held-key tracking for one player's jump binds

use super::keybind::{KeyAction, Keybind, KeybindEvent};
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Keys currently down that matched a configured bind when they were pressed.
///
/// Presses must match a bind exactly (key and modifiers). Releases only look at
/// the key, so letting go of a modifier first can't leave a key stuck down.
#[derive(Debug, Default, Clone)]
pub struct HeldKeys {
    keys: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event through the tracker. Returns whether it matched a configured bind.
    pub fn apply_event(&mut self, event: &KeybindEvent, configured: &[Keybind]) -> bool {
        if configured.is_empty() {
            self.keys.clear();
            return false;
        }

        let key = event.keybind.key;
        match event.action {
            KeyAction::Repeat => false,
            KeyAction::Press => {
                if !configured.contains(&event.keybind) {
                    return false;
                }
                self.keys.insert(key);
                true
            }
            KeyAction::Release => {
                if !configured.iter().any(|bind| bind.key == key) {
                    return false;
                }
                self.keys.remove(&key);
                true
            }
        }
    }

    /// Drop held keys that are no longer bound. Returns how many were dropped.
    pub fn prune_to_configured(&mut self, configured: &[Keybind]) -> usize {
        let before = self.keys.len();
        self.keys
            .retain(|key| configured.iter().any(|bind| bind.key == *key));
        before - self.keys.len()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_any_held(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Held keys in no particular order
    pub fn keys(&self) -> Vec<KeyCode> {
        self.keys.iter().copied().collect()
    }
}
