use crate::coords::{Affine2, Vec2};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Glow-rectangle draw payload.
///
/// The rectangle is positioned by its centre; rotation and scale are applied
/// around that centre. `life` drives the pulse animation in the shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlowCmd {
    pub center: Vec2,
    pub size: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
    /// Seconds of simulation time.
    pub life: f32,
}

impl GlowCmd {
    #[inline]
    pub fn new(center: Vec2, size: Vec2, rotation: f32, scale: Vec2, life: f32) -> Self {
        Self { center, size, rotation, scale, life }
    }

    /// Local quad space (`0..w × 0..h`) to render space.
    #[inline]
    pub fn transform(&self) -> Affine2 {
        Affine2::rotate_scale_about(self.scale, self.rotation, self.center, self.size * 0.5)
    }

    /// The four transformed quad corners in local order
    /// `(0,0)`, `(w,0)`, `(0,h)`, `(w,h)`.
    pub fn corners(&self) -> [Vec2; 4] {
        let m = self.transform();
        let (w, h) = (self.size.x, self.size.y);
        [
            m.apply(Vec2::new(0.0, 0.0)),
            m.apply(Vec2::new(w, 0.0)),
            m.apply(Vec2::new(0.0, h)),
            m.apply(Vec2::new(w, h)),
        ]
    }
}

impl DrawList {
    /// Records a glow rectangle.
    #[inline]
    pub fn push_glow(&mut self, z: ZIndex, cmd: GlowCmd) {
        self.push(z, DrawCmd::Glow(cmd));
    }
}
