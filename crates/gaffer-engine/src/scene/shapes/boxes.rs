use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Box draw payload: a solid rectangle rotated about its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCmd {
    pub rect: Rect,
    /// Rotation in radians, clockwise on screen (+Y down).
    pub rotation: f32,
    pub color: Color,
}

impl BoxCmd {
    #[inline]
    pub fn new(rect: Rect, rotation: f32, color: Color) -> Self {
        Self { rect, rotation, color }
    }

    /// Corner positions after rotation, in the order top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let r = self.rect.normalized();
        let c = r.center();
        let h = r.size * 0.5;
        let (sin, cos) = self.rotation.sin_cos();
        let rot = |v: Vec2| c + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);

        [
            rot(Vec2::new(-h.x, -h.y)),
            rot(Vec2::new(h.x, -h.y)),
            rot(Vec2::new(h.x, h.y)),
            rot(Vec2::new(-h.x, h.y)),
        ]
    }
}

impl DrawList {
    /// Records a rotated solid box.
    #[inline]
    pub fn push_box(&mut self, z: ZIndex, rect: Rect, rotation: f32, color: Color) {
        self.push(z, DrawCmd::Box(BoxCmd::new(rect, rotation, color)));
    }
}
