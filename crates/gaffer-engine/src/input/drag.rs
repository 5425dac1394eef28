use crate::coords::{Rect, Vec2, Viewport};

use super::types::{ButtonState, InputEvent, MouseButton};

/// One frame's view of the current pointer gesture, in render-space pixels.
///
/// Invariant: `up` is only ever present together with the `down` that started
/// the same gesture.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DragSnapshot {
    pub down: Option<Vec2>,
    /// Latest pointer position this frame.
    pub moved: Option<Vec2>,
    pub up: Option<Vec2>,
}

impl DragSnapshot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.down.is_none() && self.moved.is_none() && self.up.is_none()
    }
}

/// Converts raw pointer events into [`DragSnapshot`]s.
///
/// Events may arrive at any time between simulation ticks; the consumer polls
/// with [`query`](Self::query) once per tick. Raw positions are normalized
/// against the tracked bounds and scaled to the fixed render space.
#[derive(Debug, Clone)]
pub struct DragTracker {
    bounds: Rect,
    space: Viewport,
    current: DragSnapshot,
}

impl DragTracker {
    /// Creates a tracker mapping `bounds` (raw pointer space) onto `space`.
    pub fn new(bounds: Rect, space: Viewport) -> Self {
        Self {
            bounds,
            space,
            current: DragSnapshot::default(),
        }
    }

    /// Replaces the tracked bounds, e.g. after a resize.
    ///
    /// Positions recorded before the call keep their old scaling.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.current.moved = Some(self.rescale(x, y));
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.current.down = Some(self.rescale(x, y));
    }

    /// Records a release. Ignored unless a press was recorded first.
    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        if self.current.down.is_some() {
            self.current.up = Some(self.rescale(x, y));
        }
    }

    /// Feeds a translated platform event. Only the primary button drags.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::PointerMoved { pos } => self.on_pointer_move(pos.x, pos.y),
            InputEvent::PointerButton { button: MouseButton::Left, state, pos } => match state {
                ButtonState::Pressed => self.on_pointer_down(pos.x, pos.y),
                ButtonState::Released => self.on_pointer_up(pos.x, pos.y),
            },
            _ => {}
        }
    }

    /// Returns the current snapshot.
    ///
    /// A snapshot carrying `up` completes the gesture: the tracker resets to
    /// empty right after, so each gesture is reported at most once. Otherwise
    /// the state stays live for the next query.
    pub fn query(&mut self) -> DragSnapshot {
        let snapshot = self.current;
        if snapshot.up.is_some() {
            self.current = DragSnapshot::default();
        }
        snapshot
    }

    fn rescale(&self, x: f32, y: f32) -> Vec2 {
        let n = self.bounds.normalize_point(Vec2::new(x, y));
        Vec2::new(n.x * self.space.width, n.y * self.space.height)
    }
}
