use std::cell::Cell;
use std::rc::Rc;

/// Simulation callbacks driven by [`FixedStep`].
///
/// `integrate` is the only place simulation state may change. `render` is
/// called exactly once per display frame with the interpolation fraction.
pub trait Gaffer {
    /// Advances the simulation from `t` by `dt` seconds.
    fn integrate(&mut self, t: f64, dt: f64);

    /// Draws the current state; `alpha` is in `[0, 1)`.
    fn render(&mut self, alpha: f64);
}

/// Scheduler constants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Fixed simulation step in seconds.
    pub dt: f64,

    /// Upper bound on the wall-clock time consumed by a single frame, in seconds.
    ///
    /// Bounds catch-up work after a stall (backgrounded window, debugger pause).
    pub max_frame_time: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_frame_time: 0.25,
        }
    }
}

/// Simulation time owned by the scheduler.
///
/// Invariant: `0 <= accumulator < dt` after every completed step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimulationClock {
    /// Simulation time in seconds.
    pub t: f64,
    /// Fixed step in seconds.
    pub dt: f64,
    /// Leftover wall-clock time not yet consumed by a tick.
    pub accumulator: f64,
    /// Last wall-clock sample in seconds; `None` before the first frame.
    pub current_time: Option<f64>,
}

impl SimulationClock {
    fn new(dt: f64) -> Self {
        Self {
            t: 0.0,
            dt,
            accumulator: 0.0,
            current_time: None,
        }
    }

    /// Fraction of the pending tick covered by the accumulator.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }
}

/// Shared cancellation flag for a [`FixedStep`] loop.
///
/// Single-threaded by construction: the loop and its owner live on the event
/// loop thread.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    /// Stops the loop. Any frame callback already queued becomes a no-op.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Result of one scheduler step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepOutcome {
    /// `ticks` integrate calls ran, followed by one render with `alpha`.
    Stepped { ticks: u32, alpha: f64 },
    /// The loop is cancelled; nothing ran and no further frame should be scheduled.
    Cancelled,
}

/// Fixed-timestep scheduler ("fix your timestep" accumulator loop).
///
/// Decouples the simulation rate from the display rate: each display frame
/// runs zero or more `integrate(t, dt)` calls to catch up with wall-clock
/// time, then exactly one `render(alpha)`.
#[derive(Debug)]
pub struct FixedStep {
    clock: SimulationClock,
    max_frame_time: f64,
    cancel: CancelHandle,
}

impl FixedStep {
    pub fn new(config: SchedulerConfig) -> Self {
        debug_assert!(config.dt > 0.0, "fixed step must be positive");
        debug_assert!(config.max_frame_time >= config.dt);

        Self {
            clock: SimulationClock::new(config.dt),
            max_frame_time: config.max_frame_time,
            cancel: CancelHandle::default(),
        }
    }

    #[inline]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Returns a handle that stops this loop when cancelled.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Re-arms a cancelled loop.
    ///
    /// Simulation time is kept; the wall-clock baseline is dropped so the
    /// first frame after a restart advances by exactly one step, and time
    /// spent cancelled is never replayed.
    pub fn restart(&mut self) {
        self.cancel.0.set(false);
        self.clock.current_time = None;
        self.clock.accumulator = 0.0;
    }

    /// Runs one display frame at wall-clock `timestamp_ms`.
    pub fn step<G>(&mut self, timestamp_ms: f64, gaffer: &mut G) -> StepOutcome
    where
        G: Gaffer + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return StepOutcome::Cancelled;
        }

        let new_time = timestamp_ms / 1000.0;
        let dt = self.clock.dt;

        let previous = self.clock.current_time.unwrap_or(new_time - dt);
        let mut frame_time = new_time - previous;

        if frame_time > self.max_frame_time {
            log::debug!(
                "frame time {:.3}s clamped to {:.3}s",
                frame_time,
                self.max_frame_time
            );
            frame_time = self.max_frame_time;
        } else if frame_time < 0.0 {
            log::debug!("clock regression of {:.3}s ignored", -frame_time);
            frame_time = 0.0;
        }

        self.clock.current_time = Some(new_time);
        self.clock.accumulator += frame_time;

        let mut ticks = 0u32;
        while self.clock.accumulator >= dt {
            gaffer.integrate(self.clock.t, dt);
            self.clock.t += dt;
            self.clock.accumulator -= dt;
            ticks += 1;
        }

        let alpha = self.clock.alpha();
        gaffer.render(alpha);

        StepOutcome::Stepped { ticks, alpha }
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback in order.
    #[derive(Default)]
    struct Recorder {
        integrations: Vec<(f64, f64)>,
        renders: Vec<f64>,
    }

    impl Gaffer for Recorder {
        fn integrate(&mut self, t: f64, dt: f64) {
            self.integrations.push((t, dt));
        }

        fn render(&mut self, alpha: f64) {
            self.renders.push(alpha);
        }
    }

    // dt = 1/32 s and timestamps that are exact in binary keep the arithmetic exact.
    fn exact() -> FixedStep {
        FixedStep::new(SchedulerConfig { dt: 0.031_25, max_frame_time: 0.25 })
    }

    fn ticks(outcome: StepOutcome) -> u32 {
        match outcome {
            StepOutcome::Stepped { ticks, .. } => ticks,
            StepOutcome::Cancelled => panic!("loop unexpectedly cancelled"),
        }
    }

    // ── first frame ───────────────────────────────────────────────────────

    #[test]
    fn first_frame_advances_exactly_one_step() {
        let mut step = FixedStep::default();
        let mut rec = Recorder::default();

        let out = step.step(0.0, &mut rec);

        assert_eq!(ticks(out), 1);
        assert_eq!(rec.integrations, vec![(0.0, 0.01)]);
        assert_eq!(rec.renders.len(), 1);
        assert!(rec.renders[0].abs() < 1e-9);
        assert_eq!(step.clock().current_time, Some(0.0));
    }

    #[test]
    fn second_frame_after_25ms_runs_two_ticks_with_half_alpha() {
        let mut step = FixedStep::default();
        let mut rec = Recorder::default();

        step.step(0.0, &mut rec);
        let out = step.step(25.0, &mut rec);

        assert_eq!(ticks(out), 2);
        assert_eq!(rec.integrations.len(), 3);
        assert!((step.clock().t - 0.03).abs() < 1e-9);
        assert!((step.clock().accumulator - 0.005).abs() < 1e-9);
        assert!((rec.renders[1] - 0.5).abs() < 1e-6);
    }

    // ── tick counting ─────────────────────────────────────────────────────

    #[test]
    fn tick_count_matches_floor_of_accumulated_time() {
        let mut step = exact();
        let mut rec = Recorder::default();
        step.step(0.0, &mut rec);

        // Frame lengths in ms, all exactly representable in seconds.
        for &ms in &[62.5, 15.625, 125.0, 7.8125, 31.25, 203.125] {
            let before = step.clock().accumulator;
            let now = step.clock().current_time.unwrap_or(0.0) * 1000.0 + ms;
            let frame = (ms / 1000.0f64).min(0.25);
            let expected = ((before + frame) / 0.031_25).floor() as u32;

            let got = ticks(step.step(now, &mut rec));

            assert_eq!(got, expected, "frame of {ms}ms");
            let acc = step.clock().accumulator;
            assert!(acc >= 0.0 && acc < 0.031_25, "accumulator {acc} out of range");
        }
    }

    #[test]
    fn alpha_stays_in_unit_interval() {
        let mut step = FixedStep::default();
        let mut rec = Recorder::default();

        let mut now = 0.0;
        for i in 0..500 {
            // Irregular frame pacing, including a few long stalls.
            now += match i % 7 {
                0 => 16.7,
                1 => 3.1,
                2 => 33.3,
                3 => 0.4,
                4 => 400.0,
                5 => 8.9,
                _ => 11.0,
            };
            step.step(now, &mut rec);
        }

        assert_eq!(rec.renders.len(), 500);
        assert!(rec.renders.iter().all(|&a| (0.0..1.0).contains(&a)));
    }

    #[test]
    fn integrate_receives_consecutive_simulation_times() {
        let mut step = exact();
        let mut rec = Recorder::default();

        step.step(0.0, &mut rec);
        step.step(125.0, &mut rec);

        let times: Vec<f64> = rec.integrations.iter().map(|&(t, _)| t).collect();
        assert_eq!(times, vec![0.0, 0.031_25, 0.0625, 0.093_75, 0.125]);
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn long_stall_is_clamped() {
        let mut step = exact();
        let mut rec = Recorder::default();
        step.step(0.0, &mut rec);

        let out = step.step(10_000.0, &mut rec);

        // 0.25 / (1/32) = 8
        assert_eq!(ticks(out), 8);
    }

    #[test]
    fn clock_regression_runs_no_ticks() {
        let mut step = exact();
        let mut rec = Recorder::default();
        step.step(500.0, &mut rec);
        let acc_before = step.clock().accumulator;

        let out = step.step(250.0, &mut rec);

        assert_eq!(ticks(out), 0);
        assert_eq!(step.clock().accumulator, acc_before);
        assert_eq!(rec.renders.len(), 2);
    }

    #[test]
    fn repeated_timestamp_runs_no_ticks_but_renders() {
        let mut step = exact();
        let mut rec = Recorder::default();
        step.step(100.0, &mut rec);

        let out = step.step(100.0, &mut rec);

        assert_eq!(ticks(out), 0);
        assert_eq!(rec.renders.len(), 2);
    }

    // ── cancellation ──────────────────────────────────────────────────────

    #[test]
    fn cancelled_loop_ignores_queued_frames() {
        let mut step = FixedStep::default();
        let mut rec = Recorder::default();
        let handle = step.cancel_handle();

        step.step(0.0, &mut rec);
        handle.cancel();

        assert_eq!(step.step(16.0, &mut rec), StepOutcome::Cancelled);
        assert_eq!(step.step(500.0, &mut rec), StepOutcome::Cancelled);
        assert_eq!(rec.integrations.len(), 1);
        assert_eq!(rec.renders.len(), 1);
        assert!(step.is_cancelled());
    }

    #[test]
    fn restart_resumes_without_replaying_paused_time() {
        let mut step = exact();
        let mut rec = Recorder::default();
        let handle = step.cancel_handle();

        step.step(0.0, &mut rec);
        handle.cancel();
        step.step(5_000.0, &mut rec);

        step.restart();
        let out = step.step(60_000.0, &mut rec);

        assert_eq!(ticks(out), 1);
        assert!(!handle.is_cancelled());
        assert_eq!(step.clock().t, 0.0625);
    }
}
