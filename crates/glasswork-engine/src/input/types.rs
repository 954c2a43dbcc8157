/// Keys the demo binds. Everything else arrives as `Unknown` with the
/// platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    PageUp,
    PageDown,
    Home,
    End,

    B,
    H,
    R,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Pixel deltas are converted to lines with this height.
pub const LINE_HEIGHT_PX: f32 = 40.0;

/// Mouse wheel delta. `Line` comes from notched wheels, `Pixel` from
/// touchpads (logical pixels); positive `y` scrolls content towards the top.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line(f32),
    Pixel(f32),
}

impl WheelDelta {
    #[inline]
    pub fn lines(self) -> f32 {
        match self {
            WheelDelta::Line(y) => y,
            WheelDelta::Pixel(y) => y / LINE_HEIGHT_PX,
        }
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the event is an auto-repeat.
        repeat: bool,
    },
    Wheel(WheelDelta),
    Focused(bool),
}
