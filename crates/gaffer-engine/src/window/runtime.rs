use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::{Rect, Viewport};
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{DragTracker, InputState};
use crate::time::FrameClock;

/// Window settings and the logical space the app works in.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Fixed logical space the app draws into and receives pointer positions in.
    ///
    /// The window's drawable area is mapped onto it regardless of its size.
    pub logical_surface: Viewport,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gaffer".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            logical_surface: Viewport::FULL_HD,
        }
    }
}

/// Requests an app makes to the runtime. They take effect once the current
/// callback has returned.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Stops the continuous redraw requests. Frames still arrive when the
    /// platform asks for one (expose, resize).
    pub fn stop_redraw(&mut self) {
        self.commands.push(Command::SetContinuousRedraw(false));
    }

    /// Restarts continuous redraw after [`stop_redraw`](Self::stop_redraw).
    pub fn resume_redraw(&mut self) {
        self.commands.push(Command::SetContinuousRedraw(true));
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Command {
    SetContinuousRedraw(bool),
    Exit,
}

/// Owns the winit event loop.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// Window or GPU setup failures end the loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("cannot create the event loop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("event loop failed")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    drag: DragTracker,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    continuous_redraw: bool,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            continuous_redraw: true,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let (w, h) = crate::core::logical_size(&window);
        let drag = DragTracker::new(Rect::new(0.0, 0.0, w, h), self.config.logical_surface);
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            drag,
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        entry.with_gpu(|gpu| {
            let info = gpu.adapter_info();
            log::info!(
                "gpu ready: {} ({:?}), surface {:?}",
                info.name,
                info.backend,
                gpu.surface_format()
            );
        });

        Ok(entry)
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetContinuousRedraw(on) => {
                    if on != self.continuous_redraw {
                        log::debug!("continuous redraw {}", if on { "resumed" } else { "stopped" });
                    }
                    self.continuous_redraw = on;
                    if on {
                        self.request_redraw();
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn request_redraw(&self) {
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    /// Re-derives the drag tracker bounds and the surface size from the window.
    fn refresh_size(&mut self) {
        let Some(entry) = self.window.as_mut() else { return };

        entry.with_mut(|fields| {
            let (w, h) = crate::core::logical_size(fields.window);
            fields.drag.set_bounds(Rect::new(0.0, 0.0, w, h));
            fields.gpu.resize(fields.window.inner_size());
        });
        self.request_redraw();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                self.window = Some(entry);
                self.request_redraw();
            }
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.fatal = Some(e);
                self.request_exit();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.continuous_redraw {
            self.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // ouroboros closures must not capture `self`.
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.drag.apply_event(&ev);
                fields.input_state.apply(&ev);

                let window = WindowCtx { id: window_id, window: fields.window };
                if app.on_input(&window, &ev, &mut runtime_ctx) == AppControl::Exit {
                    app_control = AppControl::Exit;
                }
            }

            if app.on_window_event(window_id, &event) == AppControl::Exit {
                app_control = AppControl::Exit;
            }
        });

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
        if self.exit_requested {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.refresh_size();
            }

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let mut app_control = AppControl::Continue;
                let surface = self.config.logical_surface;

                if let Some(entry) = self.window.as_mut() {
                    entry.with_mut(|fields| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx { id: window_id, window: fields.window },
                            gpu: fields.gpu,
                            drag: fields.drag,
                            surface,
                            time: fields.clock.tick(),
                            runtime: &mut runtime_ctx,
                        };
                        app_control = self.app.on_frame(&mut ctx);
                    });
                }

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(event_loop, runtime_ctx);
            }

            _ => {}
        }
    }
}
