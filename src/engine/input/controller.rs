// Jump controller - edge detection and actuation for both players of one context

use super::gate::ContextState;
use super::held::HeldKeys;
use super::keybind::{KeybindEvent, PlayerButton, PlayerSlot};
use super::resolver::{BindingResolver, EventOutcome};
use super::settings::SettingsProvider;
use std::rc::Rc;
use winit::keyboard::KeyCode;

/// The slice of a host layer the controller talks to
pub trait JumpHost {
    /// Current state the context gate reads
    fn context_state(&self) -> ContextState;

    /// Queue a button transition into the host's input queue
    fn queue_button(&mut self, button: PlayerButton, down: bool, player2: bool, timestamp: f64);

    /// Host's "now" in its input clock domain
    fn input_timestamp(&self) -> f64;
}

/// Jump state last sent to the host for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JumpState {
    #[default]
    Released,
    Held,
}

impl JumpState {
    pub fn from_down(down: bool) -> Self {
        if down {
            Self::Held
        } else {
            Self::Released
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, Self::Held)
    }
}

/// One `queue_button` call made during a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actuation {
    pub slot: PlayerSlot,
    pub down: bool,
    pub timestamp: f64,
}

/// Everything a single processing pass sent to the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub actuations: Vec<Actuation>,
}

impl PassReport {
    pub fn is_empty(&self) -> bool {
        self.actuations.is_empty()
    }

    pub fn for_slot(&self, slot: PlayerSlot) -> Option<&Actuation> {
        self.actuations.iter().find(|a| a.slot == slot)
    }
}

#[derive(Debug, Default)]
struct PlayerJump {
    held: HeldKeys,
    applied: JumpState,
}

impl PlayerJump {
    /// Move to the desired state, returning it only if it changed
    fn transition(&mut self, desired: bool) -> Option<JumpState> {
        let next = JumpState::from_down(desired);
        if next == self.applied {
            return None;
        }
        self.applied = next;
        Some(next)
    }
}

/// Per-context jump state: held keys and applied state for both players.
///
/// Owned by a host layer and dropped with it. The host calls `handle_event`
/// from its key listener and `update`/`post_update` after its own frame work.
pub struct JumpController {
    settings: Rc<dyn SettingsProvider>,
    players: [PlayerJump; 2],
}

impl JumpController {
    pub fn new(settings: Rc<dyn SettingsProvider>) -> Self {
        Self {
            settings,
            players: Default::default(),
        }
    }

    /// Offer a keybind event to the player 1 listener, then player 2.
    ///
    /// A matched event runs a pass straight away using the event's timestamp.
    /// Player 2 never sees an event player 1 stopped.
    pub fn handle_event<H: JumpHost>(&mut self, host: &mut H, event: &KeybindEvent) -> EventOutcome {
        for slot in PlayerSlot::ALL {
            if self.listen(host, slot, event) == EventOutcome::Stop {
                return EventOutcome::Stop;
            }
        }
        EventOutcome::Propagate
    }

    fn listen<H: JumpHost>(
        &mut self,
        host: &mut H,
        slot: PlayerSlot,
        event: &KeybindEvent,
    ) -> EventOutcome {
        let settings = Rc::clone(&self.settings);
        let resolver = BindingResolver::new(settings.as_ref());

        let held = &mut self.players[slot.index()].held;
        if slot.is_player2() && !resolver.is_second_player_enabled() {
            held.clear();
            return EventOutcome::Propagate;
        }

        let binds = resolver.resolve_binds(slot);
        let matched = held.apply_event(event, &binds);
        log::trace!(
            "{:?} {:?} {:?}: matched={}",
            slot,
            event.action,
            event.keybind,
            matched
        );
        if !matched {
            return EventOutcome::Propagate;
        }

        let outcome = resolver.matched_outcome();
        self.process(host, event.timestamp);
        outcome
    }

    /// Frame update pass
    pub fn update<H: JumpHost>(&mut self, host: &mut H) -> PassReport {
        self.process(host, None)
    }

    /// Post-update pass; a no-op unless something changed since `update`
    pub fn post_update<H: JumpHost>(&mut self, host: &mut H) -> PassReport {
        self.process(host, None)
    }

    /// Recompute desired jump state for both players and actuate the ones that changed.
    ///
    /// `timestamp` is the originating event's time, if any; otherwise the host clock is used.
    pub fn process<H: JumpHost>(&mut self, host: &mut H, timestamp: Option<f64>) -> PassReport {
        let settings = Rc::clone(&self.settings);
        let resolver = BindingResolver::new(settings.as_ref());
        let p2_enabled = resolver.is_second_player_enabled();
        let context = host.context_state();

        let mut report = PassReport::default();
        for slot in PlayerSlot::ALL {
            let binds = resolver.effective_binds(slot, p2_enabled);
            let player = &mut self.players[slot.index()];

            if binds.is_empty() {
                player.held.clear();
            } else {
                let dropped = player.held.prune_to_configured(&binds);
                if dropped > 0 {
                    log::debug!("{:?}: dropped {} held key(s) no longer bound", slot, dropped);
                }
            }

            let allowed = !slot.is_player2() || p2_enabled;
            let desired = allowed && context.is_valid(slot) && player.held.is_any_held();

            let Some(state) = player.transition(desired) else {
                continue;
            };

            let timestamp = timestamp.unwrap_or_else(|| host.input_timestamp());
            host.queue_button(PlayerButton::Jump, state.is_down(), slot.is_player2(), timestamp);
            log::debug!("{:?}: jump {:?} at {:.4}", slot, state, timestamp);

            report.actuations.push(Actuation {
                slot,
                down: state.is_down(),
                timestamp,
            });
        }
        report
    }

    /// Keys currently held for a player, unordered
    pub fn held_keys(&self, slot: PlayerSlot) -> Vec<KeyCode> {
        self.players[slot.index()].held.keys()
    }

    pub fn is_key_held(&self, slot: PlayerSlot, key: KeyCode) -> bool {
        self.players[slot.index()].held.contains(key)
    }

    /// Last jump state sent to the host
    pub fn jump_state(&self, slot: PlayerSlot) -> JumpState {
        self.players[slot.index()].applied
    }

    pub fn applied(&self, slot: PlayerSlot) -> bool {
        self.jump_state(slot).is_down()
    }
}
