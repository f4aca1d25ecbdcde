//! Fixed-step frame clock
//!
//! The simulation is defined per step, not per second, so it runs at a
//! fixed rate regardless of the display's refresh rate. Each display frame
//! adds its wall time to an accumulator and consumes whole steps from it.

/// Longest frame time fed into the accumulator. Anything longer (a window
/// drag, a breakpoint) is treated as a hitch, not as time to catch up on.
const MAX_FRAME_SECONDS: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per simulation step
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FrameClock {
    pub fn new(sim_hz: f64, max_steps: u32) -> Self {
        Self {
            step: 1.0 / sim_hz.max(1.0),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add one display frame's elapsed time and return how many simulation
    /// steps to run. Time beyond `max_steps` is dropped.
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        if frame_seconds.is_finite() && frame_seconds > 0.0 {
            self.accumulator += frame_seconds.min(MAX_FRAME_SECONDS);
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Forget pending time, e.g. when resuming from a menu
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Seconds per step
    #[cfg(test)]
    pub fn step_seconds(&self) -> f64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_matching_frame() {
        let mut clock = FrameClock::new(60.0, 4);
        let total: u32 = (0..60).map(|_| clock.advance(1.0 / 60.0)).sum();
        // Float drift may leave the last step pending
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_high_refresh_rate_accumulates() {
        let mut clock = FrameClock::new(60.0, 4);
        let total: u32 = (0..144).map(|_| clock.advance(1.0 / 144.0)).sum();
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_slow_frame_runs_several_steps() {
        let mut clock = FrameClock::new(60.0, 4);
        assert_eq!(clock.advance(3.0 / 60.0 + 1e-6), 3);
    }

    #[test]
    fn test_step_cap_discards_excess() {
        let mut clock = FrameClock::new(60.0, 4);
        assert_eq!(clock.advance(0.2), 4);
        // The leftover is capped to less than two steps' worth
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_bad_frame_times_ignored() {
        let mut clock = FrameClock::new(60.0, 4);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        clock.advance(0.01);
        clock.reset();
        assert_eq!(clock.advance(0.01), 0);
        assert_eq!(clock.step_seconds(), 1.0 / 60.0);
    }
}
