//! Demos driven by the gaffer fixed-timestep loop.
//!
//! - [`spinner`]: five glowing rectangles, one spinning with interpolated rotation
//! - [`boxes`]: draggable boxes and disks with hover and group dragging

pub mod app;
pub mod boxes;
pub mod config;
pub mod entity;
pub mod spinner;

pub use app::SandboxApp;
pub use config::{DemoKind, SandboxConfig};
