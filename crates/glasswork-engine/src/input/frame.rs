use std::collections::HashSet;

use super::types::Key;

/// What changed since the last rendered frame.
///
/// [`InputState`](super::InputState) holds what is currently down; the
/// runtime clears the frame after every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame (auto-repeats included).
    pub keys_pressed: HashSet<Key>,

    pub keys_released: HashSet<Key>,

    /// Accumulated vertical wheel motion, in lines.
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.wheel_lines = 0.0;
    }

    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True when nothing happened this frame.
    pub fn is_idle(&self) -> bool {
        self.keys_pressed.is_empty() && self.keys_released.is_empty() && self.wheel_lines == 0.0
    }
}
