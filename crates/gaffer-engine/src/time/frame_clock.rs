use std::time::{Duration, Instant};

/// When a frame started, as seen by one [`FrameClock`].
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Milliseconds since the clock baseline. Strictly the value a
    /// display-frame callback would receive.
    pub timestamp_ms: f64,

    /// Counts ticks from zero.
    pub frame_index: u64,
}

/// Millisecond frame timestamps relative to the clock's creation.
///
/// `FrameClock` is designed to be used per window so that multi-window
/// applications do not share timing state. It does no clamping; stall handling
/// belongs to [`FixedStep`](super::FixedStep).
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            frame_index: 0,
        }
    }

    /// Samples the current instant and advances the frame counter.
    pub fn tick(&mut self) -> FrameTime {
        let ft = self.sample(Instant::now());
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    fn sample(&self, now: Instant) -> FrameTime {
        let since_origin: Duration = now.saturating_duration_since(self.origin);

        FrameTime {
            timestamp_ms: since_origin.as_secs_f64() * 1000.0,
            frame_index: self.frame_index,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic_and_counted() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.timestamp_ms >= a.timestamp_ms);
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn sample_measures_from_origin() {
        let clock = FrameClock::new();
        let ft = clock.sample(clock.origin + Duration::from_millis(25));
        assert!((ft.timestamp_ms - 25.0).abs() < 1e-9);
        assert_eq!(ft.frame_index, 0);
    }
}
