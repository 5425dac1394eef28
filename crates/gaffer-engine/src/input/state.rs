use crate::coords::Vec2;

use super::types::InputEvent;

/// What the runtime knows about the pointer between events.
///
/// winit reports button presses without a position, so the last move is
/// remembered here and stamped onto the translated button event.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    /// Logical window pixels; `None` while the pointer is outside.
    pub pointer: Option<Vec2>,
}

impl InputState {
    pub fn apply(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::PointerMoved { pos } => self.pointer = Some(pos),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton { .. } | InputEvent::Key { .. } | InputEvent::Focused(_) => {}
        }
    }

    /// Position to report for an event that carries none.
    #[inline]
    pub fn last_pointer(&self) -> Vec2 {
        self.pointer.unwrap_or_default()
    }
}
