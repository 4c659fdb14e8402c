// Live gameplay layer with custom jump keybinds attached

use super::input_queue::InputQueue;
use crate::engine::input::{
    ContextState, EventOutcome, JumpController, JumpHost, KeybindEvent, PlayContextState,
    PlayerButton, PlayerSlot, PlayerStatus, SettingsProvider,
};
use std::rc::Rc;

/// Host state of a play layer, everything except the jump controller
#[derive(Debug)]
pub struct PlayLayerState {
    pub is_current: bool,
    pub paused: bool,
    pub gameplay_active: bool,
    pub level_completed: bool,
    pub players: [Option<PlayerStatus>; 2],
    /// Seconds of gameplay since the attempt started
    pub attempt_time: f64,
    input_time: f64,
    pub queue: InputQueue,
}

impl PlayLayerState {
    fn new(two_player: bool) -> Self {
        Self {
            is_current: true,
            paused: false,
            gameplay_active: true,
            level_completed: false,
            players: [
                Some(PlayerStatus::Alive),
                two_player.then_some(PlayerStatus::Alive),
            ],
            attempt_time: 0.0,
            input_time: 0.0,
            queue: InputQueue::new(),
        }
    }

    /// Base frame work the host does before the jump pass
    fn step(&mut self, dt: f64) {
        if !self.paused && self.gameplay_active && !self.level_completed {
            self.attempt_time += dt;
        }
    }
}

impl JumpHost for PlayLayerState {
    fn context_state(&self) -> ContextState {
        ContextState::Play(PlayContextState {
            is_current_layer: self.is_current,
            paused: self.paused,
            gameplay_active: self.gameplay_active,
            level_completed: self.level_completed,
            players: self.players,
        })
    }

    fn queue_button(&mut self, button: PlayerButton, down: bool, player2: bool, timestamp: f64) {
        self.queue.push(button, down, player2, timestamp);
    }

    fn input_timestamp(&self) -> f64 {
        self.input_time
    }
}

/// A play layer owning its jump controller for its whole lifetime
pub struct PlayLayer {
    state: PlayLayerState,
    jump: JumpController,
}

impl PlayLayer {
    pub fn new(settings: Rc<dyn SettingsProvider>, two_player: bool) -> Self {
        log::info!("Play layer created (two player: {})", two_player);
        Self {
            state: PlayLayerState::new(two_player),
            jump: JumpController::new(settings),
        }
    }

    /// Key listener entry point
    pub fn handle_key(&mut self, event: &KeybindEvent) -> EventOutcome {
        self.jump.handle_event(&mut self.state, event)
    }

    pub fn update(&mut self, dt: f64) {
        self.state.step(dt);
        self.jump.update(&mut self.state);
    }

    pub fn post_update(&mut self, _dt: f64) {
        self.jump.post_update(&mut self.state);
    }

    /// Advance the host's input clock
    pub fn set_input_time(&mut self, timestamp: f64) {
        self.state.input_time = timestamp;
    }

    pub fn state(&self) -> &PlayLayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayLayerState {
        &mut self.state
    }

    pub fn jump(&self) -> &JumpController {
        &self.jump
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        log::info!("Play layer paused: {}", self.state.paused);
    }

    pub fn kill_player(&mut self, slot: PlayerSlot) {
        if let Some(status) = self.state.players[slot.index()].as_mut() {
            *status = PlayerStatus::Dead;
            log::info!("{:?} died", slot);
        }
    }

    /// Restart the attempt with every existing player alive again
    pub fn reset_level(&mut self) {
        for status in self.state.players.iter_mut().flatten() {
            *status = PlayerStatus::Alive;
        }
        self.state.level_completed = false;
        self.state.attempt_time = 0.0;
        log::info!("Attempt restarted");
    }

    pub fn complete_level(&mut self) {
        self.state.level_completed = true;
        log::info!("Level complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::settings::{SettingsStore, JUMP_KEY_P1};
    use crate::engine::input::Keybind;
    use approx::assert_relative_eq;
    use winit::keyboard::KeyCode;

    const DT: f64 = 1.0 / 240.0;

    fn layer_with_z() -> (Rc<SettingsStore>, PlayLayer) {
        let store = Rc::new(SettingsStore::new());
        store.set_keybinds(JUMP_KEY_P1, vec![Keybind::key(KeyCode::KeyZ)]);
        let layer = PlayLayer::new(store.clone(), false);
        (store, layer)
    }

    fn press_z() -> KeybindEvent {
        KeybindEvent::press(Keybind::key(KeyCode::KeyZ))
    }

    #[test]
    fn test_press_reaches_queue_once_per_frame_cycle() {
        let (_store, mut layer) = layer_with_z();

        layer.handle_key(&press_z().at(0.125));
        layer.update(DT);
        layer.post_update(DT);

        let queued = layer.state_mut().queue.drain();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].button, PlayerButton::Jump);
        assert!(queued[0].down);
        assert!(!queued[0].player2);
        assert_relative_eq!(queued[0].timestamp, 0.125);
    }

    #[test]
    fn test_frame_pass_uses_input_clock() {
        let (_store, mut layer) = layer_with_z();
        layer.handle_key(&press_z());
        layer.state_mut().queue.drain();

        layer.set_input_time(7.5);
        layer.toggle_pause();
        layer.update(DT);

        let queued = layer.state_mut().queue.drain();
        assert_eq!(queued.len(), 1);
        assert!(!queued[0].down);
        assert_relative_eq!(queued[0].timestamp, 7.5);
    }

    #[test]
    fn test_superseded_layer_releases() {
        let (_store, mut layer) = layer_with_z();
        layer.handle_key(&press_z());
        layer.state_mut().queue.drain();

        layer.state_mut().is_current = false;
        layer.post_update(DT);

        let queued = layer.state_mut().queue.drain();
        assert_eq!(queued.len(), 1);
        assert!(!queued[0].down);
    }

    #[test]
    fn test_death_and_restart_with_key_still_down() {
        let (_store, mut layer) = layer_with_z();
        layer.handle_key(&press_z());
        layer.kill_player(PlayerSlot::One);
        layer.update(DT);
        assert_eq!(layer.state().queue.len(), 2);

        layer.reset_level();
        layer.update(DT);
        let queued = layer.state_mut().queue.drain();
        assert_eq!(queued.len(), 3);
        assert!(queued[2].down);
    }

    #[test]
    fn test_completed_level_blocks_jump() {
        let (_store, mut layer) = layer_with_z();
        layer.complete_level();

        layer.handle_key(&press_z());
        layer.update(DT);

        assert!(layer.state().queue.is_empty());
        assert!(layer.jump().is_key_held(PlayerSlot::One, KeyCode::KeyZ));
    }

    #[test]
    fn test_missing_second_player_never_jumps() {
        let store = Rc::new(SettingsStore::with_defaults());
        let mut layer = PlayLayer::new(store, false);

        layer.handle_key(&KeybindEvent::press(Keybind::key(KeyCode::ArrowUp)));
        layer.update(DT);

        assert!(layer.state().queue.is_empty());
        assert!(!layer.jump().applied(PlayerSlot::Two));
    }

    #[test]
    fn test_attempt_time_stops_while_paused() {
        let (_store, mut layer) = layer_with_z();
        layer.update(0.5);
        layer.toggle_pause();
        layer.update(0.5);
        assert_relative_eq!(layer.state().attempt_time, 0.5);
    }
}
