// Host layers
//
// The two contexts that carry a jump controller:
// - `play_layer`: live gameplay
// - `editor_layer`: level editor playtest
// - `input_queue`: where both deliver their jump transitions

pub mod editor_layer;
pub mod input_queue;
pub mod play_layer;

// Re-export commonly used types
pub use editor_layer::{EditorLayer, EditorLayerState};
pub use input_queue::{InputQueue, QueuedButton};
pub use play_layer::{PlayLayer, PlayLayerState};
