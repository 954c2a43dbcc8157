use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Whether the runtime keeps going after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A demo driven by [`Runtime`](crate::window::Runtime).
///
/// `on_window_event` sees every event before the runtime handles it.
/// `on_frame` records and renders one frame; `ctx.gpu.size()` is the
/// current surface size there.
pub trait App {
    fn on_window_event(&mut self, _event: &WindowEvent) -> AppControl {
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
