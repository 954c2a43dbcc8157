use super::RenderOrder;

/// Stable sort key for draw items: `order` first, then insertion sequence.
///
/// Field order matters: the derived `Ord` compares `order` before `seq`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub order: RenderOrder,
    /// Insertion index, keeps equal-order items in submission order.
    pub seq: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(order: RenderOrder, seq: u32) -> Self {
        Self { order, seq }
    }
}
