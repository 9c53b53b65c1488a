//! Fixed-rate tick driver
//!
//! The only scheduling primitive in the core: wall time is fed in, whole
//! 20 ms steps come out. Leftover time stays in the accumulator, and a
//! substep cap keeps a long stall from spiraling. Stopping the clock is the
//! cancellation primitive; a stopped clock never emits another step, so no
//! generation or scoring happens after stop.

use crate::tuning::{MAX_SUBSTEPS, TICKS_PER_SEC};

/// Accumulator-based fixed timestep clock
#[derive(Debug, Clone)]
pub struct FixedClock {
    period: f32,
    accumulator: f32,
    running: bool,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(1.0 / TICKS_PER_SEC as f32)
    }
}

impl FixedClock {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
            running: true,
        }
    }

    /// Tick period in seconds
    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the clock. Accumulated time is discarded so a later restart does
    /// not replay steps from before the stop.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Feed `elapsed` seconds of wall time and run `step` once per whole tick
    /// elapsed, capped at [`MAX_SUBSTEPS`]. Returns the number of steps run.
    pub fn advance(&mut self, elapsed: f32, mut step: impl FnMut()) -> u32 {
        if !self.running {
            return 0;
        }
        // Clamp a long stall (tab hidden, debugger) to something sane
        self.accumulator += elapsed.min(0.25);

        let mut steps = 0;
        while self.accumulator >= self.period && steps < MAX_SUBSTEPS {
            step();
            self.accumulator -= self.period;
            steps += 1;
        }
        // Past the cap, drop the backlog instead of chasing it
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_ticks_only_with_carryover() {
        let mut clock = FixedClock::new(0.02);
        let mut count = 0;
        assert_eq!(clock.advance(0.05, || count += 1), 2);
        assert_eq!(count, 2);
        // 0.01 carried over; another 0.01 completes the third tick
        assert_eq!(clock.advance(0.01, || count += 1), 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn substeps_are_capped() {
        let mut clock = FixedClock::new(0.02);
        let mut count = 0;
        let steps = clock.advance(10.0, || count += 1);
        assert_eq!(steps, MAX_SUBSTEPS);
        // Backlog is dropped, not replayed on the next frame
        assert_eq!(clock.advance(0.0, || count += 1), 0);
    }

    #[test]
    fn stopped_clock_emits_nothing() {
        let mut clock = FixedClock::new(0.02);
        clock.advance(0.03, || {});
        clock.stop();
        let mut count = 0;
        assert_eq!(clock.advance(1.0, || count += 1), 0);
        assert_eq!(count, 0);

        // Restarting does not replay time accumulated before the stop
        clock.start();
        assert_eq!(clock.advance(0.0, || count += 1), 0);
    }
}
