// Jump remapping input system
//
// Turns raw keyboard press/release events into one debounced "jump held"
// signal per player and forwards the transitions to the host game.
//
// ## Architecture
//
// - `keybind`: Keybinds, player slots and incoming keyboard events
// - `settings`: Settings provider trait and the JSON-backed store
// - `resolver`: Reads per-player binds and toggles out of the settings
// - `held`: Per-player set of bound keys currently down
// - `gate`: Whether a player may be driven in the current host state
// - `controller`: Edge detection and actuation, one instance per host layer
//
// ## Usage Example
//
// ```rust
// use custom_jump::engine::input::{JumpController, KeybindEvent, SettingsStore};
//
// let settings = Rc::new(SettingsStore::load_or_default(path));
// let mut jump = JumpController::new(settings);
//
// // From the host's key listener
// let outcome = jump.handle_event(&mut host, &event);
//
// // After the host's own update / postUpdate
// jump.update(&mut host);
// jump.post_update(&mut host);
// ```

pub mod controller;
pub mod gate;
pub mod held;
pub mod keybind;
pub mod resolver;
pub mod settings;

// Re-export commonly used types
pub use controller::{Actuation, JumpController, JumpHost, JumpState, PassReport};
pub use gate::{ContextState, EditorContextState, PlayContextState, PlayerStatus};
pub use held::HeldKeys;
pub use keybind::{KeyAction, Keybind, KeybindEvent, Modifiers, PlayerButton, PlayerSlot};
pub use resolver::{BindingResolver, EventOutcome};
pub use settings::{SettingValue, SettingsError, SettingsProvider, SettingsStore};
