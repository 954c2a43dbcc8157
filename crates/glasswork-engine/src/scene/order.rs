/// Draw priority. Lower values draw first (further back).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct RenderOrder(pub i32);

impl RenderOrder {
    /// Decorative grid behind everything in the foreground.
    pub const GRID: RenderOrder = RenderOrder(-2);
    /// Full-viewport quad showing the captured background.
    pub const BACKDROP: RenderOrder = RenderOrder(-1);
    /// Glass shapes and ordinary content.
    pub const SHAPE: RenderOrder = RenderOrder(0);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreground_layers_are_ordered() {
        assert!(RenderOrder::GRID < RenderOrder::BACKDROP);
        assert!(RenderOrder::BACKDROP < RenderOrder::SHAPE);
    }
}
