// Binding resolver - turns raw settings into per-player jump binds

use super::keybind::{Keybind, PlayerSlot};
use super::settings::{
    SettingsProvider, ENABLE_JUMP_KEY_P2, JUMP_KEY_P1, JUMP_KEY_P2, STOP_KEYBIND_PROPAGATION,
};

/// What the host should do with an event after a listener saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Let the host (and later listeners) handle the event as usual
    Propagate,
    /// Swallow the event
    Stop,
}

/// Pure reads over a settings provider. Cheap enough to call per event and per frame.
pub struct BindingResolver<'a> {
    settings: &'a dyn SettingsProvider,
}

impl<'a> BindingResolver<'a> {
    pub fn new(settings: &'a dyn SettingsProvider) -> Self {
        Self { settings }
    }

    fn setting_key(slot: PlayerSlot) -> &'static str {
        match slot {
            PlayerSlot::One => JUMP_KEY_P1,
            PlayerSlot::Two => JUMP_KEY_P2,
        }
    }

    /// Configured jump binds for a slot, empty if unset
    pub fn resolve_binds(&self, slot: PlayerSlot) -> Vec<Keybind> {
        self.settings
            .keybinds(Self::setting_key(slot))
            .unwrap_or_default()
    }

    /// Binds that actually apply: player 2 gets none while disabled
    pub fn effective_binds(&self, slot: PlayerSlot, p2_enabled: bool) -> Vec<Keybind> {
        if slot.is_player2() && !p2_enabled {
            return Vec::new();
        }
        self.resolve_binds(slot)
    }

    /// Fails open: an absent toggle means player 2 binds are live
    pub fn is_second_player_enabled(&self) -> bool {
        self.settings.flag(ENABLE_JUMP_KEY_P2).unwrap_or(true)
    }

    pub fn should_stop_propagation(&self) -> bool {
        self.settings
            .flag(STOP_KEYBIND_PROPAGATION)
            .unwrap_or(false)
    }

    /// Outcome for an event a listener matched. Unmatched events always propagate.
    pub fn matched_outcome(&self) -> EventOutcome {
        if self.should_stop_propagation() {
            EventOutcome::Stop
        } else {
            EventOutcome::Propagate
        }
    }
}
