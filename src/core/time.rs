//! Frame timing utilities

use std::time::{Duration, Instant};

/// Wall-clock source for the animation loop.
///
/// Tracks milliseconds since start (the value fed to
/// [`FieldVisualization::tick`](crate::visualization::FieldVisualization::tick)),
/// per-frame delta and a once-per-second FPS estimate.
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameClock {
    /// Start a new clock at the current instant
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing. Returns elapsed milliseconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.elapsed_ms()
    }

    /// Milliseconds since the clock was created (monotonic)
    pub fn elapsed_ms(&self) -> f64 {
        self.last_frame.duration_since(self.start).as_secs_f64() * 1000.0
    }

    /// Delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
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
    fn test_new_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.elapsed_ms(), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.tick();
        assert!(b >= a);
        assert!(b >= 2.0);
        assert_eq!(clock.frame_count(), 2);
    }
}
