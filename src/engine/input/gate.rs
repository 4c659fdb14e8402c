// Context gate - decides whether custom jump input may reach a player right now

use super::keybind::PlayerSlot;

/// What the host knows about one player object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Alive,
    Dead,
}

/// Host state of a live gameplay layer, sampled once per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayContextState {
    /// This layer is the scene's one active play layer (a superseded layer may
    /// still get a few frame callbacks)
    pub is_current_layer: bool,
    pub paused: bool,
    pub gameplay_active: bool,
    pub level_completed: bool,
    /// `None` when the player object does not exist
    pub players: [Option<PlayerStatus>; 2],
}

/// Host state of the level editor while playtesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorContextState {
    pub is_current_layer: bool,
    pub playback_active: bool,
    /// The editor's own pause overlay is on screen
    pub pause_overlay_open: bool,
    pub players: [Option<PlayerStatus>; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Play(PlayContextState),
    Editor(EditorContextState),
}

fn player_alive(players: &[Option<PlayerStatus>; 2], slot: PlayerSlot) -> bool {
    players[slot.index()] == Some(PlayerStatus::Alive)
}

impl PlayContextState {
    pub fn is_valid(&self, slot: PlayerSlot) -> bool {
        if !self.is_current_layer {
            return false;
        }
        if self.paused || !self.gameplay_active || self.level_completed {
            return false;
        }
        player_alive(&self.players, slot)
    }
}

impl EditorContextState {
    pub fn is_valid(&self, slot: PlayerSlot) -> bool {
        if !self.is_current_layer {
            return false;
        }
        if !self.playback_active || self.pause_overlay_open {
            return false;
        }
        player_alive(&self.players, slot)
    }
}

impl ContextState {
    /// Whether custom jump logic may drive `slot` on this pass
    pub fn is_valid(&self, slot: PlayerSlot) -> bool {
        match self {
            Self::Play(state) => state.is_valid(slot),
            Self::Editor(state) => state.is_valid(slot),
        }
    }
}
