//! Shape renderers.

mod common;

pub mod boxes;
pub mod disk;
pub mod glow;
