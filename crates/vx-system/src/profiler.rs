//! Wall-clock timing.

use std::time::{Duration, Instant};

/// Stopwatch measuring milliseconds since a reset or since the last split.
///
/// ```rust
/// use vx_system::profiler::TimeProfiler;
///
/// let mut timer = TimeProfiler::new();
/// let lap = timer.split_ms();
/// assert!(lap >= 0.0);
/// assert!(timer.elapsed_ms() >= lap);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeProfiler {
    start: Instant,
    split: Instant,
}

impl Default for TimeProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProfiler {
    /// Starts a new profiler.
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, split: now }
    }

    /// Restarts both the total and the split clocks.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Time since creation or the last [`reset`](Self::reset).
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// [`elapsed`](Self::elapsed) in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Milliseconds since the previous split (or reset), then starts a new split.
    pub fn split_ms(&mut self) -> f64 {
        let now = Instant::now();
        let lap = now.duration_since(self.split);
        self.split = now;
        lap.as_secs_f64() * 1000.0
    }
}
