use gaffer_engine::coords::{Rect, Vec2};
use gaffer_engine::paint::Color;
use gaffer_engine::scene::shapes::Border;
use gaffer_engine::scene::{DrawList, ZIndex};

/// Side of the square hit box of every entity, in render-space pixels.
pub const ENTITY_SIZE: f32 = 100.0;

/// Angular velocity (rad/s) a hovered entity spins up to.
pub const HOVER_SPIN: f32 = 2.0;

/// Fraction of the remaining distance to the target covered per tick.
pub const FOLLOW: f32 = 0.5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shape {
    Box,
    Disk,
}

/// A draggable scene object.
///
/// `pos` is the top-left anchor of the hit box; the shape is drawn inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub shape: Shape,
    pub pos: Vec2,
    pub target: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Angular velocity in rad/s.
    pub spin: f32,
    pub target_spin: f32,
    pub hover: bool,
    /// Seconds of simulation this entity has lived through.
    pub life: f32,
    pub z: ZIndex,
}

impl Entity {
    pub fn new(id: EntityId, shape: Shape, pos: Vec2, z: ZIndex) -> Self {
        Self {
            id,
            shape,
            pos,
            target: pos,
            rotation: 0.0,
            spin: 0.0,
            target_spin: 0.0,
            hover: false,
            life: 0.0,
            z,
        }
    }

    /// Axis-aligned hit box. Rotation is ignored.
    #[inline]
    pub fn hit_rect(&self) -> Rect {
        Rect::from_origin_size(self.pos, Vec2::new(ENTITY_SIZE, ENTITY_SIZE))
    }

    #[inline]
    pub fn hit(&self, p: Vec2) -> bool {
        self.hit_rect().contains(p)
    }

    /// Advances one fixed step.
    pub fn integrate(&mut self, dt: f32) {
        self.pos = self.pos.lerp(self.target, FOLLOW);

        let delta = self.target_spin - self.spin;
        self.spin += delta.clamp(-dt, dt);
        self.rotation += self.spin * dt;

        self.life += dt;
    }

    /// Rotation extrapolated `lead` seconds past the last tick.
    #[inline]
    pub fn rotation_at(&self, lead: f32) -> f32 {
        self.rotation + self.spin * lead
    }

    pub fn draw(&self, list: &mut DrawList, lead: f32) {
        match self.shape {
            Shape::Box => {
                let color = if self.hover { BOX_HOVER } else { BOX_FILL };
                list.push_box(self.z, self.hit_rect(), self.rotation_at(lead), color);
            }
            Shape::Disk => {
                let color = if self.hover { DISK_HOVER } else { DISK_FILL };
                list.push_disk(
                    self.z,
                    self.hit_rect().center(),
                    ENTITY_SIZE * 0.5,
                    color,
                    Some(Border::new(4.0, DISK_BORDER)),
                );
            }
        }
    }
}

// Opaque, so straight and premultiplied components coincide.
const BOX_FILL: Color = Color::from_premul(0.15, 0.39, 0.92, 1.0);
const BOX_HOVER: Color = Color::from_premul(0.38, 0.65, 0.98, 1.0);
const DISK_FILL: Color = Color::from_premul(0.92, 0.35, 0.05, 1.0);
const DISK_HOVER: Color = Color::from_premul(0.98, 0.57, 0.24, 1.0);
const DISK_BORDER: Color = Color::from_premul(0.98, 0.98, 0.97, 1.0);
