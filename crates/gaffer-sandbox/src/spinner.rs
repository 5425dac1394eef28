//! Glow-rectangle demo: four still rectangles and one spinning at 1 rad/s.

use gaffer_engine::coords::Vec2;
use gaffer_engine::scene::shapes::glow::GlowCmd;
use gaffer_engine::scene::{DrawList, ZIndex};

/// Still rectangles as `(center x, center y, width, height)`.
const STILL: [(f32, f32, f32, f32); 4] = [
    (1000.0, 500.0, 200.0, 200.0),
    (1400.0, 500.0, 200.0, 200.0),
    (1400.0, 700.0, 800.0, 200.0),
    (200.0, 800.0, 600.0, 600.0),
];

const SPINNING: (f32, f32, f32, f32) = (1500.0, 800.0, 600.0, 600.0);
const SPINNING_SCALE: f32 = 1.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    /// Simulation time of the last tick.
    t: f64,
    dt: f64,
    rotation: f64,
    /// Angular velocity in rad/s.
    spin: f64,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            t: 0.0,
            dt: 0.0,
            rotation: 0.0,
            spin: 1.0,
        }
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn integrate(&mut self, t: f64, dt: f64) {
        self.t = t;
        self.dt = dt;
        self.rotation += self.spin * dt;
    }

    /// Records the five glow rectangles; the spinning one is rotated to where
    /// it will be `alpha` of a tick after the last one.
    pub fn draw(&self, list: &mut DrawList, alpha: f64) {
        let life = self.t as f32;
        let z = ZIndex::new(0);

        for (x, y, w, h) in STILL {
            list.push_glow(z, GlowCmd::new(Vec2::new(x, y), Vec2::new(w, h), 0.0, Vec2::new(1.0, 1.0), life));
        }

        let (x, y, w, h) = SPINNING;
        let theta = (self.rotation + self.spin * self.dt * alpha) as f32;
        list.push_glow(
            z,
            GlowCmd::new(
                Vec2::new(x, y),
                Vec2::new(w, h),
                theta,
                Vec2::new(SPINNING_SCALE, SPINNING_SCALE),
                life,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaffer_engine::scene::DrawCmd;

    fn glows(list: &DrawList) -> Vec<GlowCmd> {
        list.items()
            .iter()
            .map(|item| match &item.cmd {
                DrawCmd::Glow(g) => *g,
                other => panic!("unexpected command {other:?}"),
            })
            .collect()
    }

    #[test]
    fn integrate_advances_rotation_by_spin() {
        let mut s = Spinner::new();
        s.integrate(0.0, 0.25);
        s.integrate(0.25, 0.25);
        assert_eq!(s.rotation(), 0.5);
    }

    #[test]
    fn draw_records_five_rectangles() {
        let mut s = Spinner::new();
        s.integrate(1.5, 0.25);
        let mut list = DrawList::new();
        s.draw(&mut list, 0.0);

        let g = glows(&list);
        assert_eq!(g.len(), 5);
        assert_eq!(g[2].center, Vec2::new(1400.0, 700.0));
        assert_eq!(g[2].size, Vec2::new(800.0, 200.0));
        assert!(g.iter().all(|c| c.life == 1.5));
        assert!(g[..4].iter().all(|c| c.rotation == 0.0 && c.scale == Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn spinning_rectangle_is_interpolated() {
        let mut s = Spinner::new();
        s.integrate(0.0, 0.25);
        let mut list = DrawList::new();
        s.draw(&mut list, 0.5);

        let spinning = glows(&list)[4];
        assert_eq!(spinning.center, Vec2::new(1500.0, 800.0));
        assert_eq!(spinning.scale, Vec2::new(1.3, 1.3));
        assert_eq!(spinning.rotation, 0.375);
    }
}
