use std::time::{Duration, Instant};

/// Longest step handed to animations; longer gaps (window dragged, debugger
/// paused) are cut down to this.
pub const MAX_STEP: Duration = Duration::from_millis(250);

/// Timing of one frame, in seconds.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    pub dt: f32,
    /// Sum of every clamped `dt`; drives rotation and shader noise.
    pub elapsed: f32,
}

/// Produces one [`FrameTime`] per presented frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None, elapsed: 0.0 }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.advance(Instant::now())
    }

    /// The first frame has `dt = 0`, so nothing moves before it is shown.
    fn advance(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).min(MAX_STEP),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.elapsed += dt.as_secs_f64();
        FrameTime { dt: dt.as_secs_f32(), elapsed: self.elapsed as f32 }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_does_not_advance() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Instant::now()), FrameTime::default());
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.advance(start);
        let ft = clock.advance(start + Duration::from_secs(5));
        assert_eq!(ft.dt, 0.25);
        assert_eq!(ft.elapsed, 0.25);
    }

    #[test]
    fn elapsed_sums_steps() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.advance(start);
        clock.advance(start + Duration::from_millis(100));
        let ft = clock.advance(start + Duration::from_millis(200));
        assert!((ft.elapsed - 0.2).abs() < 1e-6);
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }
}
