use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::disk::DiskCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::InstancedQuads;

/// Draws `DrawCmd::Disk` as anti-aliased circles. A border is an inner ring
/// along the rim.
pub struct DiskRenderer {
    quads: InstancedQuads<DiskInstance>,
}

impl DiskRenderer {
    pub fn new() -> Self {
        Self {
            quads: InstancedQuads::new("disk", include_str!("shaders/disk.wgsl"), DiskInstance::layout),
        }
    }

    /// Same contract as [`BoxRenderer::prepare`](super::boxes::BoxRenderer::prepare),
    /// for disks.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) -> u32 {
        self.quads.clear();
        for item in draw_list.iter_in_paint_order() {
            if let DrawCmd::Disk(cmd) = &item.cmd {
                self.quads.push(DiskInstance::from_cmd(cmd).unwrap_or_else(Zeroable::zeroed));
            }
        }
        self.quads.upload(ctx)
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        self.quads.draw(rpass, instances);
    }
}

impl Default for DiskRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// center, (radius, border width), fill, border color: 48 B.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct DiskInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    color: [f32; 4],
    border_color: [f32; 4],
}

impl DiskInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &DiskCmd) -> Option<Self> {
        let radius = cmd.radius;
        if radius.is_nan() || radius <= 0.0 || !cmd.center.is_finite() {
            return None;
        }

        let (width, border_color) = cmd
            .border
            .as_ref()
            .map_or((0.0, [0.0; 4]), |b| (b.width.clamp(0.0, radius), b.color.to_array()));

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [radius, width],
            color: cmd.color.to_array(),
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::shapes::Border;

    #[test]
    fn border_width_is_clamped_to_radius() {
        let cmd = DiskCmd::new(
            Vec2::new(10.0, 10.0),
            5.0,
            Color::black(),
            Some(Border::new(8.0, Color::black())),
        );
        let inst = DiskInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.radius_bw, [5.0, 5.0]);
    }

    #[test]
    fn missing_border_has_zero_width() {
        let cmd = DiskCmd::new(Vec2::new(0.0, 0.0), 50.0, Color::black(), None);
        let inst = DiskInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.radius_bw, [50.0, 0.0]);
        assert_eq!(inst.border_color, [0.0; 4]);
    }

    #[test]
    fn degenerate_disks_are_skipped() {
        let zero = DiskCmd::new(Vec2::new(0.0, 0.0), 0.0, Color::black(), None);
        let nan = DiskCmd::new(Vec2::new(f32::NAN, 0.0), 3.0, Color::black(), None);
        assert!(DiskInstance::from_cmd(&zero).is_none());
        assert!(DiskInstance::from_cmd(&nan).is_none());
    }
}
