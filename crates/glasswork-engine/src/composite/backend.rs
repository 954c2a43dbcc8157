use anyhow::Result;

use crate::coords::PixelSize;
use crate::render::SceneView;
use crate::scene::DrawList;

/// An offscreen color target the backend can render into and sample from.
pub trait OffscreenTarget {
    fn size(&self) -> PixelSize;
}

/// Where a scene pass renders to.
#[derive(Debug)]
pub enum PassTarget<'a, B> {
    /// The offscreen capture buffer.
    Offscreen(&'a B),
    /// The primary display target.
    Primary,
}

/// Renderer operations the compositor relies on.
pub trait CompositeBackend {
    type Buffer: OffscreenTarget;

    /// Allocates an offscreen buffer of `size`. Failure is fatal to the
    /// frame.
    fn allocate_buffer(&mut self, size: PixelSize) -> Result<Self::Buffer>;

    /// Clears `target`, then renders `scene` into it. `capture` is the
    /// buffer sampled by glass and backdrop commands, if any.
    fn render_scene(
        &mut self,
        target: PassTarget<'_, Self::Buffer>,
        scene: &mut DrawList,
        view: SceneView<'_>,
        capture: Option<&Self::Buffer>,
    ) -> Result<()>;
}
