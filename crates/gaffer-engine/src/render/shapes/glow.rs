use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::glow::GlowCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::{quad_pipeline, viewport_bind_group_layout, viewport_binding, ViewportUniform};

/// Maximum number of glow quads drawn per frame.
pub const MAX_QUADS: usize = 400;

/// Renderer for `DrawCmd::Glow`.
///
/// Unlike the instanced renderers, the glow pass streams fully expanded
/// geometry: both the vertex and the index buffer are rebuilt from the draw
/// list on every `prepare` and uploaded into fixed-size buffers sized for
/// [`MAX_QUADS`]. Quads past the capacity are dropped.
///
/// Blending is additive-ish (`SrcAlpha`, `DstAlpha`) so overlapping glows
/// brighten each other.
#[derive(Default)]
pub struct GlowRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    binding: Option<(wgpu::Buffer, wgpu::BindGroup)>,

    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,

    vertices: Vec<GlowVertex>,
    indices: Vec<u16>,

    warned_overflow: bool,
}

impl GlowRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds and uploads the geometry of every `DrawCmd::Glow` in paint
    /// order. Returns the number of quads kept (at most [`MAX_QUADS`]).
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) -> u32 {
        self.vertices.clear();
        self.indices.clear();

        let mut quads = 0usize;
        let mut dropped = 0usize;
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Glow(cmd) = &item.cmd else { continue };
            if quads == MAX_QUADS {
                dropped += 1;
                continue;
            }
            push_glow_quad(&mut self.vertices, &mut self.indices, cmd);
            quads += 1;
        }

        if dropped > 0 && !self.warned_overflow {
            log::warn!("glow renderer capacity is {MAX_QUADS} quads; dropped {dropped}");
            self.warned_overflow = true;
        }

        if quads == 0 {
            return 0;
        }

        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);

        let Some((ubo, _)) = self.binding.as_ref() else { return 0 };
        let Some(vbo) = self.vbo.as_ref() else { return 0 };
        let Some(ibo) = self.ibo.as_ref() else { return 0 };

        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));
        // Six u16 per quad keeps the upload a multiple of 4 bytes.
        ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&self.indices));

        quads as u32
    }

    /// Draws prepared quads `quads` into an open pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, quads: Range<u32>) {
        let end = quads.end.min((self.indices.len() / 6) as u32);
        if quads.start >= end {
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some((_, bind_group)) = self.binding.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };
        let Some(ibo) = self.ibo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(quads.start * 6..end * 6, 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gaffer glow shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/glow.wgsl").into()),
        });

        let bgl = viewport_bind_group_layout(ctx.device, "gaffer glow bgl");
        self.pipeline = Some(quad_pipeline(
            ctx.device,
            "gaffer glow pipeline",
            &shader,
            &bgl,
            &[GlowVertex::layout()],
            ctx.surface_format,
            glow_blend(),
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.binding = Some(viewport_binding(ctx.device, &bgl, "gaffer glow viewport"));
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gaffer glow vbo"),
            size: (MAX_QUADS * 4 * std::mem::size_of::<GlowVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gaffer glow ibo"),
            size: (MAX_QUADS * 6 * std::mem::size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
    }
}

fn glow_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::DstAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── geometry ──────────────────────────────────────────────────────────────

/// Vertex layout (32 bytes):
///
///  offset  0  position [f32; 2]   loc 0  render-space pixels
///  offset  8  quad     [f32; 2]   loc 1  quad coordinate in 0..1
///  offset 16  aspect   [f32; 2]   loc 2  untransformed (w, h)
///  offset 24  life     [f32; 2]   loc 3  (life, life)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlowVertex {
    pub position: [f32; 2],
    pub quad: [f32; 2],
    pub aspect: [f32; 2],
    pub life: [f32; 2],
}

impl GlowVertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2, // quad
        2 => Float32x2, // aspect
        3 => Float32x2  // life
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlowVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Quad coordinates per corner of [`GlowCmd::corners`]. The middle two are
/// transposed, which turns the glow segment horizontal on screen.
const GLOW_QUAD: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

/// Appends one glow rectangle: four vertices and six indices.
///
/// Indices reference the vertices just appended: with `i0` the index of the
/// first one, the triangles are `(i0, i0+1, i0+2)` and `(i0+1, i0+3, i0+2)`.
pub fn push_glow_quad(vertices: &mut Vec<GlowVertex>, indices: &mut Vec<u16>, cmd: &GlowCmd) {
    let i0 = vertices.len() as u16;
    let aspect = [cmd.size.x, cmd.size.y];
    let life = [cmd.life, cmd.life];

    for (corner, quad) in cmd.corners().into_iter().zip(GLOW_QUAD) {
        vertices.push(GlowVertex {
            position: [corner.x, corner.y],
            quad,
            aspect,
            life,
        });
    }

    indices.extend_from_slice(&[i0, i0 + 1, i0 + 2, i0 + 1, i0 + 3, i0 + 2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    fn cmd(x: f32, y: f32, life: f32) -> GlowCmd {
        GlowCmd::new(
            Vec2::new(x, y),
            Vec2::new(200.0, 100.0),
            0.0,
            Vec2::new(1.0, 1.0),
            life,
        )
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn quad_packs_positions_uv_aspect_and_life() {
        let mut v = Vec::new();
        let mut i = Vec::new();
        push_glow_quad(&mut v, &mut i, &cmd(1000.0, 500.0, 2.5));

        assert_eq!(v.len(), 4);
        assert_eq!(v[0].position, [900.0, 450.0]);
        assert_eq!(v[1].position, [1100.0, 450.0]);
        assert_eq!(v[2].position, [900.0, 550.0]);
        assert_eq!(v[3].position, [1100.0, 550.0]);

        assert_eq!(
            v.iter().map(|x| x.quad).collect::<Vec<_>>(),
            vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]
        );
        assert!(v.iter().all(|x| x.aspect == [200.0, 100.0]));
        assert!(v.iter().all(|x| x.life == [2.5, 2.5]));
    }

    #[test]
    fn indices_are_offset_per_quad() {
        let mut v = Vec::new();
        let mut i = Vec::new();
        for k in 0..3 {
            push_glow_quad(&mut v, &mut i, &cmd(k as f32 * 100.0, 0.0, 0.0));
        }

        assert_eq!(v.len(), 12);
        assert_eq!(i.len(), 18);
        assert_eq!(&i[0..6], &[0, 1, 2, 1, 3, 2]);
        assert_eq!(&i[12..18], &[8, 9, 10, 9, 11, 10]);
    }

    #[test]
    fn every_index_addresses_a_written_vertex() {
        let mut v = Vec::new();
        let mut i = Vec::new();
        for k in 0..MAX_QUADS {
            push_glow_quad(&mut v, &mut i, &cmd(k as f32, 0.0, 0.0));
        }
        assert!(i.iter().all(|&ix| (ix as usize) < v.len()));
        assert_eq!(i.len(), MAX_QUADS * 6);
    }

    #[test]
    fn vertex_stride_matches_documented_layout() {
        assert_eq!(std::mem::size_of::<GlowVertex>(), 32);
    }
}
