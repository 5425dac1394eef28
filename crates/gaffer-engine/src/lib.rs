//! Gaffer engine crate.
//!
//! Owns the platform + GPU runtime pieces, the fixed-timestep scheduler and the
//! pointer drag tracker used by the sandbox demos.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
