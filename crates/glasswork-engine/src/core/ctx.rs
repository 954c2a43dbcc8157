use anyhow::Result;
use winit::window::{Window, WindowId};

use crate::coords::{PixelSize, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Window handle plus derived metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Logical size, physical mapping included.
    pub fn viewport(&self) -> Viewport {
        let scale = self.window.scale_factor();
        let logical: winit::dpi::LogicalSize<f64> = self.window.inner_size().to_logical(scale);
        Viewport::new(logical.width as f32, logical.height as f32, scale as f32)
    }

    #[inline]
    pub fn physical_size(&self) -> PixelSize {
        PixelSize::from(self.window.inner_size())
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Acquires the surface, runs `draw` and presents.
    ///
    /// `draw` owns every pass on the surface view, so its first pass must
    /// clear it.
    /// Nothing is drawn while the window is minimized. Surface loss is
    /// handled here. An error from `draw` is logged and turns into
    /// [`AppControl::Exit`]; the frame is still presented.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>) -> Result<()>,
    {
        if !self.gpu.is_presentable() {
            return AppControl::Continue;
        }
        let viewport = self.window.viewport();

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            viewport,
            self.time.elapsed,
        );

        let result = {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.size());
            draw(&rctx, &mut target)
        };

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        match result {
            Ok(()) => AppControl::Continue,
            Err(err) => {
                log::error!("frame failed: {err:#}");
                AppControl::Exit
            }
        }
    }
}
