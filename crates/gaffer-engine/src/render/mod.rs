//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels of the fixed render surface (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.
//! - The frame is cleared before any renderer runs; renderers load and draw on top.

mod ctx;
mod painter;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use painter::{paint_runs, PaintRun, ShapeKind, ShapePainter};
