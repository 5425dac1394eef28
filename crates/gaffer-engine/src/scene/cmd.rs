use crate::scene::shapes::boxes::BoxCmd;
use crate::scene::shapes::disk::DiskCmd;
use crate::scene::shapes::glow::GlowCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Box(BoxCmd),
    Disk(DiskCmd),
    Glow(GlowCmd),
}
