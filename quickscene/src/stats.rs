//! Frame timing counters

/// Smoothed frame-rate and frame-count tracking
///
/// Frame times are smoothed with an exponential moving average so the
/// displayed rate does not jitter frame to frame.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames: u64,
    avg_frame_time: f32,
}

const SMOOTHING: f32 = 0.05;

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            avg_frame_time: 0.0,
        }
    }

    /// Record one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.frames += 1;
        if self.avg_frame_time == 0.0 {
            self.avg_frame_time = dt;
        } else {
            self.avg_frame_time += (dt - self.avg_frame_time) * SMOOTHING;
        }
    }

    /// Total frames recorded
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Smoothed frames per second, zero before the first timed frame
    pub fn fps(&self) -> f32 {
        if self.avg_frame_time > 0.0 {
            1.0 / self.avg_frame_time
        } else {
            0.0
        }
    }

    /// Smoothed frame time in milliseconds
    pub fn frame_time_ms(&self) -> f32 {
        self.avg_frame_time * 1000.0
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counts_frames() {
        let mut stats = FrameStats::new();
        for _ in 0..5 {
            stats.tick(0.016);
        }
        assert_eq!(stats.frame_count(), 5);
    }

    #[test]
    fn steady_frame_time_converges_to_its_rate() {
        let mut stats = FrameStats::new();
        for _ in 0..200 {
            stats.tick(0.02);
        }
        assert_relative_eq!(stats.fps(), 50.0, epsilon = 0.5);
        assert_relative_eq!(stats.frame_time_ms(), 20.0, epsilon = 0.2);
    }

    #[test]
    fn fps_is_zero_before_any_timed_frame() {
        let stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
    }
}
