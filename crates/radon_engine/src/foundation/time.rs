//! Frame timing

use std::time::Instant;

/// Monotonic frame clock
///
/// Each call to [`FrameClock::tick`] returns the wall-clock seconds elapsed
/// since the previous call (or since construction for the first call).
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock starting now
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Sample the clock and return the delta since the previous sample
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Sample the clock at an explicit instant
    ///
    /// Instants earlier than the previous sample yield a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta_time = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Delta returned by the most recent tick, in seconds
    #[must_use]
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all deltas since the clock was created
    #[must_use]
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
