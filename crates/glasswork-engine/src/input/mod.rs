//! Keyboard and wheel input.
//!
//! The runtime translates winit events into [`InputEvent`]s; apps only see
//! the per-frame [`InputFrame`] and the held-key [`InputState`].

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, WheelDelta, LINE_HEIGHT_PX};
