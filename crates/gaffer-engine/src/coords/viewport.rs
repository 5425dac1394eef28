/// Size of a logical drawing space, in pixels.
///
/// Shape shaders divide by it to reach NDC, so draw commands never depend on
/// the physical window size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// 1920×1080, the space the demos simulate and draw in.
    pub const FULL_HD: Viewport = Viewport::new(1920.0, 1080.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
