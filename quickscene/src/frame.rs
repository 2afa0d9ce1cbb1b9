//! Frame loop state and time source
//!
//! The facade advances the scene once per displayed frame. Whether a frame
//! advances at all is controlled here: a stopped loop yields no delta and the
//! facade draws nothing. Time comes from an injectable [`Clock`] so tests can
//! step frames deterministically.

use std::cell::Cell;
use std::rc::Rc;

/// Source of monotonic time in seconds
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall-clock time since creation
pub struct SystemClock {
    origin: instant::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-stepped clock for deterministic frame tests
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            time: Rc::new(Cell::new(0.0)),
        }
    }

    /// Shared handle used to advance the clock from outside the loop
    pub fn handle(&self) -> Rc<Cell<f64>> {
        Rc::clone(&self.time)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        self.time.get()
    }
}

/// Start/stop gate for per-frame scene updates
pub struct FrameLoop {
    running: bool,
    clock: Box<dyn Clock>,
    last: Option<f64>,
}

impl FrameLoop {
    /// Create a loop backed by wall-clock time
    pub fn new(running: bool) -> Self {
        Self::with_clock(running, Box::new(SystemClock::new()))
    }

    /// Create a loop with an explicit time source
    pub fn with_clock(running: bool, clock: Box<dyn Clock>) -> Self {
        Self {
            running,
            clock,
            last: None,
        }
    }

    /// Replace the time source; the next tick restarts delta tracking
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
        self.last = None;
    }

    /// Resume frame advances; the first tick after a restart reports zero
    /// delta rather than the stopped span
    pub fn start(&mut self) {
        self.running = true;
        self.last = None;
    }

    /// Suspend frame advances
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one frame, returning the elapsed seconds since the previous
    /// tick, or `None` while stopped
    pub fn tick(&mut self) -> Option<f32> {
        if !self.running {
            return None;
        }
        let now = self.clock.now();
        let dt = self.last.map_or(0.0, |last| now - last);
        self.last = Some(now);
        Some(dt as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stopped_loop_yields_no_frames() {
        let mut frame = FrameLoop::new(false);
        assert!(!frame.is_running());
        assert_eq!(frame.tick(), None);
    }

    #[test]
    fn manual_clock_steps_deltas() {
        let clock = ManualClock::new();
        let time = clock.handle();
        let mut frame = FrameLoop::with_clock(true, Box::new(clock));
        assert_relative_eq!(frame.tick().unwrap(), 0.0);
        time.set(0.25);
        assert_relative_eq!(frame.tick().unwrap(), 0.25);
        time.set(0.75);
        assert_relative_eq!(frame.tick().unwrap(), 0.5);
    }

    #[test]
    fn restart_does_not_report_stopped_span() {
        let clock = ManualClock::new();
        let time = clock.handle();
        let mut frame = FrameLoop::with_clock(true, Box::new(clock));
        frame.tick();
        frame.stop();
        time.set(100.0);
        assert_eq!(frame.tick(), None);
        frame.start();
        assert_relative_eq!(frame.tick().unwrap(), 0.0);
        time.set(100.1);
        assert_relative_eq!(frame.tick().unwrap(), 0.1, epsilon = 1e-6);
    }
}
