use crate::coords::Vec2;

/// Keys the runtime names; anything else is reported by platform scancode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Press/release state shared by keys and mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

/// Window input, already translated from the platform.
///
/// Pointer positions are logical window pixels, origin top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { pos: Vec2 },
    /// Carries the last known pointer position.
    PointerButton { button: MouseButton, state: ButtonState, pos: Vec2 },
    PointerLeft,
    Key { key: Key, state: ButtonState, repeat: bool },
    Focused(bool),
}
