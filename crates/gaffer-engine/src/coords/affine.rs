use super::Vec2;

/// 2D affine transform stored as the top two rows of a 3×3 matrix.
///
/// Maps `p` to `(a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2 { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    /// Scale by `scale`, rotate by `theta` (radians), and place the local
    /// point `pivot` at `translate`.
    pub fn rotate_scale_about(scale: Vec2, theta: f32, translate: Vec2, pivot: Vec2) -> Self {
        let (sin, cos) = theta.sin_cos();

        let a = cos * scale.x;
        let b = sin * scale.x;
        let c = -sin * scale.y;
        let d = cos * scale.y;

        Self {
            a,
            b,
            c,
            d,
            tx: translate.x - (pivot.x * a + pivot.y * c),
            ty: translate.y - (pivot.x * b + pivot.y * d),
        }
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
