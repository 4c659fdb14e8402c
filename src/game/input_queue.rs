// Host-side input queue that receives jump transitions

use crate::engine::input::PlayerButton;

/// One entry pushed through `queue_button`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedButton {
    pub button: PlayerButton,
    pub down: bool,
    pub player2: bool,
    pub timestamp: f64,
}

/// Button transitions waiting for the next physics step
#[derive(Debug, Default)]
pub struct InputQueue {
    entries: Vec<QueuedButton>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, button: PlayerButton, down: bool, player2: bool, timestamp: f64) {
        log::info!(
            "queueButton({}, down={}, p2={}, t={:.4})",
            button.id(),
            down,
            player2,
            timestamp
        );
        self.entries.push(QueuedButton {
            button,
            down,
            player2,
            timestamp,
        });
    }

    /// Hand every queued transition to the physics step
    pub fn drain(&mut self) -> Vec<QueuedButton> {
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[QueuedButton] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
