use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::boxes::BoxCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::InstancedQuads;

/// Draws `DrawCmd::Box` as solid rectangles spun about their centre.
pub struct BoxRenderer {
    quads: InstancedQuads<BoxInstance>,
}

impl BoxRenderer {
    pub fn new() -> Self {
        Self {
            quads: InstancedQuads::new("box", include_str!("shaders/box.wgsl"), BoxInstance::layout),
        }
    }

    /// Uploads one instance per `DrawCmd::Box` in paint order and returns
    /// the instance count. Degenerate commands keep their slot as an invisible
    /// instance so indices line up with the draw list.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) -> u32 {
        self.quads.clear();
        for item in draw_list.iter_in_paint_order() {
            if let DrawCmd::Box(cmd) = &item.cmd {
                self.quads.push(BoxInstance::from_cmd(cmd).unwrap_or_else(Zeroable::zeroed));
            }
        }
        self.quads.upload(ctx)
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        self.quads.draw(rpass, instances);
    }
}

impl Default for BoxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// center, half extents, rotation (x only, padded to 16 B), color: 48 B.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct BoxInstance {
    center: [f32; 2],
    half_size: [f32; 2],
    rotation: [f32; 4],
    color: [f32; 4],
}

impl BoxInstance {
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

    fn from_cmd(cmd: &BoxCmd) -> Option<Self> {
        let rect = cmd.rect.normalized();
        if rect.is_empty() || !rect.is_finite() || !cmd.rotation.is_finite() {
            return None;
        }
        let center = rect.center();
        Some(Self {
            center: [center.x, center.y],
            half_size: [rect.size.x / 2.0, rect.size.y / 2.0],
            rotation: [cmd.rotation, 0.0, 0.0, 0.0],
            color: cmd.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    #[test]
    fn instance_is_centred_with_half_extents() {
        let cmd = BoxCmd::new(Rect::new(200.0, 100.0, 100.0, 50.0), 0.5, Color::black());
        let inst = BoxInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.center, [250.0, 125.0]);
        assert_eq!(inst.half_size, [50.0, 25.0]);
        assert_eq!(inst.rotation[0], 0.5);
        assert_eq!(inst.color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_box_is_skipped() {
        let cmd = BoxCmd::new(Rect::new(0.0, 0.0, 0.0, 10.0), 0.0, Color::black());
        assert!(BoxInstance::from_cmd(&cmd).is_none());
    }

    #[test]
    fn instance_stride_matches_documented_layout() {
        assert_eq!(std::mem::size_of::<BoxInstance>(), 48);
    }
}
