use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Disk draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

impl DiskCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, color: Color, border: Option<Border>) -> Self {
        Self { center, radius, color, border }
    }
}

impl DrawList {
    /// Records a disk draw command.
    #[inline]
    pub fn push_disk(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Disk(DiskCmd::new(center, radius, color, border)));
    }
}
