// Level editor layer: custom jump keybinds during playtest

use super::input_queue::InputQueue;
use crate::engine::input::{
    ContextState, EditorContextState, EventOutcome, JumpController, JumpHost, KeybindEvent,
    PlayerButton, PlayerSlot, PlayerStatus, SettingsProvider,
};
use std::rc::Rc;

#[derive(Debug)]
pub struct EditorLayerState {
    pub is_current: bool,
    pub playback_active: bool,
    pub pause_overlay_open: bool,
    pub players: [Option<PlayerStatus>; 2],
    two_player: bool,
    input_time: f64,
    pub queue: InputQueue,
}

impl JumpHost for EditorLayerState {
    fn context_state(&self) -> ContextState {
        ContextState::Editor(EditorContextState {
            is_current_layer: self.is_current,
            playback_active: self.playback_active,
            pause_overlay_open: self.pause_overlay_open,
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

/// An editor layer owning its jump controller. Players only exist while playtesting.
pub struct EditorLayer {
    state: EditorLayerState,
    jump: JumpController,
}

impl EditorLayer {
    pub fn new(settings: Rc<dyn SettingsProvider>, two_player: bool) -> Self {
        log::info!("Editor layer created (two player: {})", two_player);
        Self {
            state: EditorLayerState {
                is_current: true,
                playback_active: false,
                pause_overlay_open: false,
                players: [None, None],
                two_player,
                input_time: 0.0,
                queue: InputQueue::new(),
            },
            jump: JumpController::new(settings),
        }
    }

    pub fn handle_key(&mut self, event: &KeybindEvent) -> EventOutcome {
        self.jump.handle_event(&mut self.state, event)
    }

    pub fn update(&mut self, _dt: f64) {
        self.jump.update(&mut self.state);
    }

    pub fn post_update(&mut self, _dt: f64) {
        self.jump.post_update(&mut self.state);
    }

    pub fn set_input_time(&mut self, timestamp: f64) {
        self.state.input_time = timestamp;
    }

    /// Start playtest playback, spawning the player objects
    pub fn start_playtest(&mut self) {
        self.state.playback_active = true;
        self.state.players = [
            Some(PlayerStatus::Alive),
            self.state.two_player.then_some(PlayerStatus::Alive),
        ];
        log::info!("Playtest started");
    }

    /// Stop playback; the player objects go away with it
    pub fn stop_playtest(&mut self) {
        self.state.playback_active = false;
        self.state.players = [None, None];
        log::info!("Playtest stopped");
    }

    pub fn set_pause_overlay(&mut self, open: bool) {
        self.state.pause_overlay_open = open;
    }

    pub fn kill_player(&mut self, slot: PlayerSlot) {
        if let Some(status) = self.state.players[slot.index()].as_mut() {
            *status = PlayerStatus::Dead;
        }
    }

    pub fn state(&self) -> &EditorLayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorLayerState {
        &mut self.state
    }

    pub fn jump(&self) -> &JumpController {
        &self.jump
    }
}
