use anyhow::{Context, Result};

use crate::camera::{Camera, Light};
use crate::coords::PixelSize;
use crate::paint::Color;
use crate::render::{GlassMaterial, SceneView};
use crate::scene::{BackdropCmd, DrawCmd, DrawList, RenderOrder};

use super::{CompositeBackend, OffscreenTarget, PassTarget};

/// Compositor configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Clear color of the primary target, also shown through the glass
    /// wherever the capture is transparent.
    pub clear: Color,
    /// Clear color of the capture buffer.
    pub capture_clear: Color,
    pub light: Light,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            clear: Color::from_srgb_u8(0x10, 0x10, 0x10, 0xff),
            capture_clear: Color::transparent(),
            light: Light::default(),
        }
    }
}

/// What a glass draw needs from the compositor: material parameters, its
/// draw priority and the size of the capture it samples.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlassBinding {
    pub material: GlassMaterial,
    pub order: RenderOrder,
    pub capture_size: PixelSize,
}

/// Per-frame summary returned by [`DualSceneCompositor::render_frame`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub capture_size: PixelSize,
    pub reallocated: bool,
    pub background_draws: usize,
    pub foreground_draws: usize,
}

/// Owns the two persistent scenes and the offscreen capture buffer `T`.
///
/// Per frame:
/// 1. [`begin_frame`](Self::begin_frame) clears both scenes and queues the
///    backdrop quad into the foreground.
/// 2. The host records into [`background_mut`](Self::background_mut) and
///    [`foreground_mut`](Self::foreground_mut).
/// 3. [`render_frame`](Self::render_frame) captures the background, then
///    composites the foreground over the primary target.
pub struct DualSceneCompositor<T: OffscreenTarget> {
    config: CompositorConfig,
    background: DrawList,
    foreground: DrawList,
    buffer: Option<T>,
    viewport: PixelSize,
}

impl<T: OffscreenTarget> DualSceneCompositor<T> {
    pub fn new(config: CompositorConfig, viewport: PixelSize) -> Self {
        Self {
            config,
            background: DrawList::new(),
            foreground: DrawList::new(),
            buffer: None,
            viewport,
        }
    }

    /// Records the new viewport size; the buffer is reallocated before the
    /// next capture.
    pub fn resize(&mut self, viewport: PixelSize) {
        if self.viewport != viewport {
            log::debug!("compositor viewport {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    /// Size the next capture buffer will have.
    #[inline]
    pub fn capture_size(&self) -> PixelSize {
        PixelSize::new(self.viewport.width.max(1), self.viewport.height.max(1))
    }

    #[inline]
    pub fn buffer(&self) -> Option<&T> {
        self.buffer.as_ref()
    }

    pub fn background_mut(&mut self) -> &mut DrawList {
        &mut self.background
    }

    pub fn foreground_mut(&mut self) -> &mut DrawList {
        &mut self.foreground
    }

    /// Clears both scenes and queues the backdrop quad.
    pub fn begin_frame(&mut self) {
        self.background.clear();
        self.foreground.clear();
        self.foreground.push(RenderOrder::BACKDROP, DrawCmd::Backdrop(BackdropCmd { opacity: 1.0 }));
    }

    pub fn glass_binding(&self, material: GlassMaterial) -> GlassBinding {
        GlassBinding { material, order: RenderOrder::SHAPE, capture_size: self.capture_size() }
    }

    /// Capture, restore and composite for one frame.
    ///
    /// An allocation failure aborts the frame and is returned to the caller.
    pub fn render_frame<B>(&mut self, backend: &mut B, camera: &Camera) -> Result<FrameReport>
    where
        B: CompositeBackend<Buffer = T>,
    {
        let size = self.capture_size();

        let stale = self.buffer.as_ref().is_none_or(|b| b.size() != size);
        if stale {
            // Never keep a stale buffer around, even if allocation fails.
            self.buffer = None;
            let buffer = backend
                .allocate_buffer(size)
                .with_context(|| format!("failed to allocate {}x{} capture buffer", size.width, size.height))?;
            log::debug!("allocated capture buffer {}x{}", size.width, size.height);
            self.buffer = Some(buffer);
        }
        let Some(buffer) = self.buffer.as_ref() else {
            anyhow::bail!("capture buffer missing after allocation");
        };

        let capture_view = SceneView {
            camera,
            light: &self.config.light,
            clear: self.config.capture_clear,
            background: self.config.clear,
        };
        backend
            .render_scene(PassTarget::Offscreen(buffer), &mut self.background, capture_view, None)
            .context("background capture failed")?;

        let primary_view = SceneView { clear: self.config.clear, ..capture_view };
        backend
            .render_scene(PassTarget::Primary, &mut self.foreground, primary_view, Some(buffer))
            .context("foreground composite failed")?;

        Ok(FrameReport {
            capture_size: size,
            reallocated: stale,
            background_draws: self.background.len(),
            foreground_draws: self.foreground.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeBuffer {
        id: u32,
        size: PixelSize,
    }

    impl OffscreenTarget for FakeBuffer {
        fn size(&self) -> PixelSize {
            self.size
        }
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Allocate(PixelSize),
        Offscreen { buffer: u32, orders: Vec<i32> },
        Primary { capture: Option<u32>, orders: Vec<i32> },
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        clears: Vec<Color>,
        next_id: u32,
        fail_alloc: bool,
    }

    impl CompositeBackend for RecordingBackend {
        type Buffer = FakeBuffer;

        fn allocate_buffer(&mut self, size: PixelSize) -> Result<FakeBuffer> {
            anyhow::ensure!(!self.fail_alloc, "out of memory");
            self.calls.push(Call::Allocate(size));
            self.next_id += 1;
            Ok(FakeBuffer { id: self.next_id, size })
        }

        fn render_scene(
            &mut self,
            target: PassTarget<'_, FakeBuffer>,
            scene: &mut DrawList,
            view: SceneView<'_>,
            capture: Option<&FakeBuffer>,
        ) -> Result<()> {
            self.clears.push(view.clear);
            let orders = scene.iter_in_paint_order().map(|i| i.key.order.0).collect();
            self.calls.push(match target {
                PassTarget::Offscreen(b) => Call::Offscreen { buffer: b.id, orders },
                PassTarget::Primary => Call::Primary { capture: capture.map(|b| b.id), orders },
            });
            Ok(())
        }
    }

    fn compositor(w: u32, h: u32) -> DualSceneCompositor<FakeBuffer> {
        DualSceneCompositor::new(CompositorConfig::default(), PixelSize::new(w, h))
    }

    // ── cycle ─────────────────────────────────────────────────────────────

    #[test]
    fn capture_runs_before_composite_with_same_buffer() {
        let mut c = compositor(800, 600);
        let mut backend = RecordingBackend::default();
        c.begin_frame();
        let report = c.render_frame(&mut backend, &Camera::default()).unwrap();

        assert_eq!(
            backend.calls,
            vec![
                Call::Allocate(PixelSize::new(800, 600)),
                Call::Offscreen { buffer: 1, orders: vec![] },
                Call::Primary { capture: Some(1), orders: vec![RenderOrder::BACKDROP.0] },
            ]
        );
        assert!(report.reallocated);
        assert_eq!(report.background_draws, 0);
    }

    #[test]
    fn backdrop_draws_before_shapes_every_frame() {
        let mut c = compositor(64, 64);
        let mut backend = RecordingBackend::default();
        for _ in 0..3 {
            c.begin_frame();
            c.foreground_mut().push(RenderOrder::SHAPE, DrawCmd::Backdrop(BackdropCmd { opacity: 0.5 }));
            c.foreground_mut().push(RenderOrder::GRID, DrawCmd::Backdrop(BackdropCmd { opacity: 0.2 }));
            c.render_frame(&mut backend, &Camera::default()).unwrap();
        }

        let primaries: Vec<_> = backend
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Primary { orders, .. } => Some(orders.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(primaries.len(), 3);
        for orders in primaries {
            assert_eq!(orders, vec![RenderOrder::GRID.0, RenderOrder::BACKDROP.0, RenderOrder::SHAPE.0]);
        }
    }

    #[test]
    fn buffer_is_reused_until_resize() {
        let mut c = compositor(100, 100);
        let mut backend = RecordingBackend::default();

        c.begin_frame();
        assert!(c.render_frame(&mut backend, &Camera::default()).unwrap().reallocated);
        c.begin_frame();
        assert!(!c.render_frame(&mut backend, &Camera::default()).unwrap().reallocated);

        c.resize(PixelSize::new(200, 50));
        c.begin_frame();
        let report = c.render_frame(&mut backend, &Camera::default()).unwrap();
        assert!(report.reallocated);
        assert_eq!(report.capture_size, PixelSize::new(200, 50));
        assert_eq!(c.buffer().map(|b| b.size), Some(PixelSize::new(200, 50)));

        let allocs = backend.calls.iter().filter(|c| matches!(c, Call::Allocate(_))).count();
        assert_eq!(allocs, 2);
        assert!(matches!(backend.calls.last(), Some(Call::Primary { capture: Some(2), .. })));
    }

    #[test]
    fn empty_background_still_captures() {
        let mut c = compositor(10, 10);
        let mut backend = RecordingBackend::default();
        c.begin_frame();
        let report = c.render_frame(&mut backend, &Camera::default()).unwrap();
        assert_eq!(report.background_draws, 0);
        assert!(backend.calls.iter().any(|c| matches!(c, Call::Offscreen { .. })));
    }

    #[test]
    fn each_pass_clears_its_own_target() {
        let mut c = compositor(10, 10);
        let mut backend = RecordingBackend::default();
        c.begin_frame();
        c.render_frame(&mut backend, &Camera::default()).unwrap();

        let config = CompositorConfig::default();
        assert_eq!(backend.clears, vec![config.capture_clear, config.clear]);
    }

    #[test]
    fn zero_viewport_captures_at_least_one_pixel() {
        let c = compositor(0, 0);
        assert_eq!(c.capture_size(), PixelSize::new(1, 1));
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn allocation_failure_aborts_the_frame() {
        let mut c = compositor(10, 10);
        let mut backend = RecordingBackend { fail_alloc: true, ..Default::default() };
        c.begin_frame();
        assert!(c.render_frame(&mut backend, &Camera::default()).is_err());
        assert!(backend.calls.is_empty());
        assert!(c.buffer().is_none());
    }

    #[test]
    fn failed_reallocation_drops_stale_buffer() {
        let mut c = compositor(10, 10);
        let mut backend = RecordingBackend::default();
        c.begin_frame();
        c.render_frame(&mut backend, &Camera::default()).unwrap();

        c.resize(PixelSize::new(20, 20));
        backend.fail_alloc = true;
        c.begin_frame();
        assert!(c.render_frame(&mut backend, &Camera::default()).is_err());
        assert!(c.buffer().is_none());
    }

    // ── glass binding ─────────────────────────────────────────────────────

    #[test]
    fn glass_binding_follows_viewport() {
        let mut c = compositor(320, 240);
        let b = c.glass_binding(GlassMaterial::default());
        assert_eq!(b.order, RenderOrder::SHAPE);
        assert_eq!(b.capture_size, PixelSize::new(320, 240));

        c.resize(PixelSize::new(640, 480));
        assert_eq!(c.glass_binding(GlassMaterial::default()).capture_size, PixelSize::new(640, 480));
    }
}
