//! Frame timing
//!
//! [`FrameClock`] measures the wall-clock time between frames and derives a
//! frames-per-second estimate from it. Deltas are reported in whole
//! milliseconds, which is the unit all simulation code consumes.

use std::time::Instant;

/// Measures per-frame deltas and tracks the current frame rate
///
/// Call [`FrameClock::tick`] once at the top of every frame. The first tick
/// reports a delta of zero. A zero delta leaves the fps estimate at its
/// previous value rather than collapsing it to infinity.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    delta_ms: u64,
    fps: f32,
}

impl FrameClock {
    /// Creates a clock that has not yet ticked
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of a frame and returns the elapsed milliseconds since
    /// the previous tick
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(0, |last| now.duration_since(last).as_millis() as u64);
        self.last_tick = Some(now);
        self.apply_delta(delta)
    }

    fn apply_delta(&mut self, delta_ms: u64) -> u64 {
        self.delta_ms = delta_ms;
        if delta_ms > 0 {
            self.fps = 1000.0 / delta_ms as f32;
        }
        delta_ms
    }

    /// Forgets the previous tick, so the next one reports a zero delta
    ///
    /// Call when frames stop arriving for a while, e.g. across a pause, to
    /// keep the gap out of the next frame's delta.
    pub fn restart(&mut self) {
        self.last_tick = None;
    }

    /// Delta of the most recent frame in milliseconds
    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }

    /// Most recent frame rate estimate
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
