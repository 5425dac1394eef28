use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::input::InputEvent;
use crate::window::RuntimeCtx;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for raw window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called for every translated input event, after the runtime has updated
    /// its own input state and drag tracker.
    ///
    /// Runs even while redraws are stopped, so this is where a paused app
    /// resumes itself.
    fn on_input(
        &mut self,
        window: &WindowCtx<'_>,
        event: &InputEvent,
        runtime: &mut RuntimeCtx,
    ) -> AppControl {
        let _ = (window, event, runtime);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
