//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window; `tick()` once per presented frame yields a
//!   monotonic millisecond timestamp
//! - feed that timestamp to `FixedStep::step`, which runs the fixed-size
//!   simulation ticks and one interpolated render

mod fixed_step;
mod frame_clock;

pub use fixed_step::{CancelHandle, FixedStep, Gaffer, SchedulerConfig, SimulationClock, StepOutcome};
pub use frame_clock::{FrameClock, FrameTime};
