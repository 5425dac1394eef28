//! Pointer and keyboard input.
//!
//! Platform events are translated once (see `platform::winit`) into
//! [`InputEvent`]s, which then feed [`InputState`] and the [`DragTracker`].

mod drag;
pub(crate) mod platform;
mod state;
mod types;

pub use drag::{DragSnapshot, DragTracker};
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
