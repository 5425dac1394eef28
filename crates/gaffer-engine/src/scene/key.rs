use super::ZIndex;

/// Paint-order key for draw items: z-layer first, then push order.
///
/// Raising an entity only changes its `z`; the draw stream never has to be
/// reshuffled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    // Compared first by the derived `Ord`.
    pub z: ZIndex,
    /// Push index within the frame; breaks ties inside a layer.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}
