use web_time::Instant;

/// Smoothed frame-rate tracking.
///
/// Frames are paced by the host's refresh signal; this only measures them.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames measured so far
    frames: u64,
}

impl FrameTiming {
    /// Start measuring from `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Record a finished frame.
    pub fn end_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded since construction.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    #[test]
    fn converges_toward_steady_rate() {
        let mut now = Instant::now();
        let mut timing = FrameTiming::new(now);
        for _ in 0..500 {
            now += Duration::from_millis(10);
            timing.end_frame(now);
        }
        assert!((timing.fps() - 100.0).abs() < 1.0, "{}", timing.fps());
        assert_eq!(timing.frame_count(), 500);
    }

    #[test]
    fn zero_length_frame_keeps_estimate() {
        let now = Instant::now();
        let mut timing = FrameTiming::new(now);
        timing.end_frame(now);
        assert_eq!(timing.fps(), 60.0);
    }
}
