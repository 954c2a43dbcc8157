//! Frame timing. The runtime ticks one [`FrameClock`] per redraw.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime, MAX_STEP};
