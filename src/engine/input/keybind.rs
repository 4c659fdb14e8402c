// Keybinds, player slots and the keyboard events fed into the jump controller

use serde::{Deserialize, Serialize};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// One of the (at most) two local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots, in listener order
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub fn is_player2(self) -> bool {
        matches!(self, Self::Two)
    }
}

/// Logical buttons the host accepts through `queue_button`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerButton {
    Jump,
}

impl PlayerButton {
    /// Numeric id in the host's button table
    pub fn id(self) -> i32 {
        match self {
            Self::Jump => 1,
        }
    }
}

/// Modifier keys that must be down for a keybind to fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// A configurable trigger: a key plus the modifiers held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keybind {
    pub key: KeyCode,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
}

impl Keybind {
    /// A keybind with no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: KeyCode, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Edge class of a keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    /// OS auto-repeat while a key is held; carries no edge
    Repeat,
}

/// A keyboard event as delivered by the host's keybind stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeybindEvent {
    pub keybind: Keybind,
    pub action: KeyAction,
    /// Host input timestamp of the event, if the host supplied one
    pub timestamp: Option<f64>,
}

impl KeybindEvent {
    pub fn press(keybind: Keybind) -> Self {
        Self {
            keybind,
            action: KeyAction::Press,
            timestamp: None,
        }
    }

    pub fn release(keybind: Keybind) -> Self {
        Self {
            keybind,
            action: KeyAction::Release,
            timestamp: None,
        }
    }

    pub fn repeat(keybind: Keybind) -> Self {
        Self {
            keybind,
            action: KeyAction::Repeat,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Translate a winit keyboard event. Keys without a physical code are dropped.
    pub fn from_key_event(
        event: &KeyEvent,
        modifiers: ModifiersState,
        timestamp: Option<f64>,
    ) -> Option<Self> {
        Self::from_parts(event.physical_key, event.state, event.repeat, modifiers, timestamp)
    }

    pub fn from_parts(
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
        modifiers: ModifiersState,
        timestamp: Option<f64>,
    ) -> Option<Self> {
        let PhysicalKey::Code(key) = physical_key else {
            return None;
        };

        let action = match (state, repeat) {
            (ElementState::Pressed, true) => KeyAction::Repeat,
            (ElementState::Pressed, false) => KeyAction::Press,
            (ElementState::Released, _) => KeyAction::Release,
        };

        Some(Self {
            keybind: Keybind::with_modifiers(key, modifiers.into()),
            action,
            timestamp,
        })
    }
}
