//! Coordinate and geometry types shared across engine renderers and demos.
//!
//! Canonical CPU space:
//! - Logical pixels of a fixed render surface (1920×1080 by default)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a viewport uniform.

mod affine;
mod rect;
mod vec2;
mod viewport;

pub use affine::Affine2;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
