//! Renderer-independent draw stream.
//!
//! Demos push [`DrawCmd`]s into a [`DrawList`]; renderers read them back in
//! paint order (z, then submission order).

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
