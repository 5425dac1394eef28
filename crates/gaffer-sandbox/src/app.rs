use std::cell::Cell;
use std::rc::Rc;

use gaffer_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use gaffer_engine::input::{ButtonState, DragTracker, InputEvent, Key};
use gaffer_engine::paint::Color;
use gaffer_engine::render::ShapePainter;
use gaffer_engine::scene::DrawList;
use gaffer_engine::time::{CancelHandle, FixedStep, Gaffer, SchedulerConfig, StepOutcome};
use gaffer_engine::window::{CursorIcon, RuntimeCtx};

use crate::boxes::{DragScene, SceneHooks};
use crate::config::DemoKind;
use crate::spinner::Spinner;

enum Demo {
    Spinner(Spinner),
    Boxes(DragScene),
}

impl Demo {
    fn clear_color(&self) -> Color {
        match self {
            Demo::Spinner(_) => Color::black(),
            Demo::Boxes(_) => Color::from_straight(0.07, 0.07, 0.09, 1.0),
        }
    }
}

/// One display frame's view of the app, handed to [`FixedStep::step`].
struct Tick<'a> {
    demo: &'a mut Demo,
    drag: &'a mut DragTracker,
    draw_list: &'a mut DrawList,
}

impl Gaffer for Tick<'_> {
    fn integrate(&mut self, t: f64, dt: f64) {
        match self.demo {
            Demo::Spinner(spinner) => spinner.integrate(t, dt),
            Demo::Boxes(scene) => {
                let snapshot = self.drag.query();
                scene.integrate(&snapshot, dt);
            }
        }
    }

    fn render(&mut self, alpha: f64) {
        self.draw_list.clear();
        match self.demo {
            Demo::Spinner(spinner) => spinner.draw(self.draw_list, alpha),
            Demo::Boxes(scene) => scene.draw(self.draw_list, alpha),
        }
    }
}

/// Sandbox application: one demo driven by a fixed-timestep loop.
///
/// Keys: `Escape` quits, `Space` pauses and resumes the loop.
pub struct SandboxApp {
    demo: Demo,
    step: FixedStep,
    cancel: CancelHandle,
    draw_list: DrawList,
    painter: ShapePainter,
    /// Cursor requested by the scene during the last ticks.
    cursor: Rc<Cell<Option<CursorIcon>>>,
}

impl SandboxApp {
    pub fn new(kind: DemoKind, scheduler: SchedulerConfig) -> Self {
        let cursor: Rc<Cell<Option<CursorIcon>>> = Rc::default();

        let demo = match kind {
            DemoKind::Spinner => Demo::Spinner(Spinner::new()),
            DemoKind::Boxes => {
                let pending = cursor.clone();
                let hooks = SceneHooks {
                    on_hover_change: Some(Box::new(move |hovered| {
                        let icon = if hovered { CursorIcon::Pointer } else { CursorIcon::Default };
                        pending.set(Some(icon));
                    })),
                    ..SceneHooks::default()
                };
                Demo::Boxes(DragScene::demo(hooks))
            }
        };

        let step = FixedStep::new(scheduler);
        let cancel = step.cancel_handle();

        Self {
            demo,
            step,
            cancel,
            draw_list: DrawList::new(),
            painter: ShapePainter::new(),
            cursor,
        }
    }

    fn toggle_pause(&mut self, runtime: &mut RuntimeCtx) {
        if self.cancel.is_cancelled() {
            self.step.restart();
            runtime.resume_redraw();
            log::info!("loop resumed at t = {:.2}s", self.step.clock().t);
        } else {
            self.cancel.cancel();
            runtime.stop_redraw();
            log::info!("loop paused at t = {:.2}s", self.step.clock().t);
        }
    }

    /// Steps the loop for one display frame. A cancelled loop leaves the
    /// draw list from the last stepped frame in place.
    fn advance(&mut self, timestamp_ms: f64, drag: &mut DragTracker) -> StepOutcome {
        let mut tick = Tick {
            demo: &mut self.demo,
            drag,
            draw_list: &mut self.draw_list,
        };
        self.step.step(timestamp_ms, &mut tick)
    }
}

impl App for SandboxApp {
    fn on_input(
        &mut self,
        _window: &WindowCtx<'_>,
        event: &InputEvent,
        runtime: &mut RuntimeCtx,
    ) -> AppControl {
        match event {
            InputEvent::Key { key: Key::Escape, state: ButtonState::Pressed, .. } => AppControl::Exit,
            InputEvent::Key { key: Key::Space, state: ButtonState::Pressed, repeat: false } => {
                self.toggle_pause(runtime);
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match self.advance(ctx.time.timestamp_ms, ctx.drag) {
            // Paused: expose and resize redraws repaint the last frame.
            StepOutcome::Cancelled => {}
            StepOutcome::Stepped { ticks, alpha } => {
                log::trace!("frame {}: {ticks} ticks, alpha {alpha:.3}", ctx.time.frame_index);
            }
        }

        if let Some(icon) = self.cursor.take() {
            ctx.window.set_cursor(icon);
        }

        let clear = self.demo.clear_color();
        let painter = &mut self.painter;
        let draw_list = &mut self.draw_list;
        ctx.render(clear, |rctx, target| painter.paint(rctx, target, draw_list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaffer_engine::coords::{Rect, Vec2, Viewport};
    use gaffer_engine::scene::ZIndex;

    use crate::entity::{Entity, EntityId, Shape};

    fn tracker() -> DragTracker {
        DragTracker::new(Rect::new(0.0, 0.0, 1920.0, 1080.0), Viewport::FULL_HD)
    }

    fn scene(demo: &Demo) -> &DragScene {
        match demo {
            Demo::Boxes(scene) => scene,
            Demo::Spinner(_) => panic!("not a boxes demo"),
        }
    }

    fn ticks(outcome: StepOutcome) -> u32 {
        match outcome {
            StepOutcome::Stepped { ticks, .. } => ticks,
            StepOutcome::Cancelled => panic!("loop cancelled"),
        }
    }

    #[test]
    fn released_gesture_ends_drag_on_first_tick_of_the_frame() {
        let ends = Rc::new(Cell::new(0u32));
        let counter = ends.clone();
        let hooks = SceneHooks {
            on_drag_end: Some(Box::new(move |_| counter.set(counter.get() + 1))),
            ..SceneHooks::default()
        };
        let entity = Entity::new(EntityId(0), Shape::Box, Vec2::new(200.0, 200.0), ZIndex::new(0));
        let mut demo = Demo::Boxes(DragScene::new(vec![entity], hooks));
        let mut drag = tracker();
        let mut draw_list = DrawList::new();
        let mut step = FixedStep::new(SchedulerConfig::default());

        let mut frame = |ms: f64, demo: &mut Demo, drag: &mut DragTracker| {
            let mut tick = Tick { demo, drag, draw_list: &mut draw_list };
            ticks(step.step(ms, &mut tick))
        };

        assert_eq!(frame(0.0, &mut demo, &mut drag), 1);

        drag.on_pointer_move(250.0, 250.0);
        frame(25.0, &mut demo, &mut drag);
        assert!(scene(&demo).entities()[0].hover);

        drag.on_pointer_down(250.0, 250.0);
        drag.on_pointer_move(260.0, 260.0);
        frame(50.0, &mut demo, &mut drag);
        assert!(scene(&demo).drag().is_some());

        drag.on_pointer_move(300.0, 300.0);
        drag.on_pointer_up(300.0, 300.0);
        let n = frame(100.0, &mut demo, &mut drag);

        assert!(n >= 2, "frame ran {n} ticks");
        assert!(scene(&demo).drag().is_none());
        assert_eq!(ends.get(), 1);
        assert!(scene(&demo).entities().iter().all(|e| !e.hover));
        assert!(drag.query().is_empty());
    }

    #[test]
    fn spinner_never_consumes_the_gesture() {
        let mut demo = Demo::Spinner(Spinner::new());
        let mut drag = tracker();
        let mut draw_list = DrawList::new();
        let mut step = FixedStep::new(SchedulerConfig::default());

        drag.on_pointer_down(10.0, 10.0);
        drag.on_pointer_move(20.0, 20.0);
        drag.on_pointer_up(20.0, 20.0);

        for ms in [0.0, 50.0, 100.0] {
            let mut tick = Tick { demo: &mut demo, drag: &mut drag, draw_list: &mut draw_list };
            ticks(step.step(ms, &mut tick));
        }

        let Demo::Spinner(spinner) = &demo else { unreachable!() };
        assert!(spinner.rotation() > 0.0);
        assert!(drag.query().up.is_some());
    }

    #[test]
    fn paused_loop_keeps_the_last_frame_for_repaint() {
        let mut app = SandboxApp::new(DemoKind::Boxes, SchedulerConfig::default());
        let mut drag = tracker();

        assert_eq!(ticks(app.advance(0.0, &mut drag)), 1);
        let last = app.draw_list.items().to_vec();
        assert!(!last.is_empty());

        app.toggle_pause(&mut RuntimeCtx::default());
        let t = app.step.clock().t;

        assert_eq!(app.advance(500.0, &mut drag), StepOutcome::Cancelled);
        assert_eq!(app.draw_list.items(), &last[..]);
        assert_eq!(app.step.clock().t, t);
    }
}
