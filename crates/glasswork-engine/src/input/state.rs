use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Keys held down in the demo window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event and records what it changed in `frame`.
    ///
    /// A press counts once until released; auto-repeats count again so held
    /// arrows keep stepping a knob.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, state: KeyState::Pressed, repeat } => {
                if self.keys_down.insert(key) || repeat {
                    frame.keys_pressed.insert(key);
                }
            }
            InputEvent::Key { key, state: KeyState::Released, .. } => {
                if self.keys_down.remove(&key) {
                    frame.keys_released.insert(key);
                }
            }
            InputEvent::Wheel(delta) => frame.wheel_lines += delta.lines(),
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are lost while unfocused.
                    self.keys_down.clear();
                }
            }
        }
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
