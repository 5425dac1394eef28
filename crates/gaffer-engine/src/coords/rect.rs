use super::Vec2;

/// Axis-aligned rectangle; `origin` is the top-left corner, y grows down.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle spanning `center ± half_extent` on both axes.
    #[inline]
    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self::from_origin_size(center - half_extent, half_extent * 2.0)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Same area with the origin moved so both extents are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        fn axis(start: f32, len: f32) -> (f32, f32) {
            if len < 0.0 { (start + len, -len) } else { (start, len) }
        }
        let (x, w) = axis(self.origin.x, self.size.x);
        let (y, h) = axis(self.origin.y, self.size.y);
        Rect::new(x, y, w, h)
    }

    /// Left and top edges are inside, right and bottom edges are not.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let end = r.origin + r.size;
        (r.origin.x..end.x).contains(&p.x) && (r.origin.y..end.y).contains(&p.y)
    }

    /// Maps `p` into `[0, 1]²` relative to this rectangle.
    ///
    /// Degenerate axes map to `0`.
    #[inline]
    pub fn normalize_point(self, p: Vec2) -> Vec2 {
        let r = self.normalized();
        let nx = if r.size.x > 0.0 { (p.x - r.origin.x) / r.size.x } else { 0.0 };
        let ny = if r.size.y > 0.0 { (p.y - r.origin.y) / r.size.y } else { 0.0 };
        Vec2::new(nx, ny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_negative_width() {
        let rect = r(10.0, 0.0, -4.0, 5.0);
        let n = rect.normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(200.0, 200.0, 100.0, 100.0).contains(Vec2::new(250.0, 250.0)));
    }

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, -1.0)));
    }

    // ── from_center ───────────────────────────────────────────────────────

    #[test]
    fn from_center_spans_both_sides() {
        let rect = Rect::from_center(Vec2::new(500.0, 500.0), Vec2::new(150.0, 150.0));
        assert_eq!(rect, r(350.0, 350.0, 300.0, 300.0));
        assert_eq!(rect.center(), Vec2::new(500.0, 500.0));
    }

    // ── normalize_point ───────────────────────────────────────────────────

    #[test]
    fn normalize_point_maps_corners() {
        let rect = r(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.normalize_point(Vec2::new(10.0, 20.0)), Vec2::new(0.0, 0.0));
        assert_eq!(rect.normalize_point(Vec2::new(110.0, 70.0)), Vec2::new(1.0, 1.0));
        assert_eq!(rect.normalize_point(Vec2::new(60.0, 45.0)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn normalize_point_degenerate_axis_is_zero() {
        let rect = r(0.0, 0.0, 0.0, 10.0);
        assert_eq!(rect.normalize_point(Vec2::new(5.0, 5.0)), Vec2::new(0.0, 0.5));
    }
}
