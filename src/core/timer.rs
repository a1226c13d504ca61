use std::time::Duration;

/// Repeating wall-clock timer. Accumulates elapsed time and reports how many
/// whole periods have passed. The leftover phase carries over between calls
/// so a stream of short deltas fires at the same rate as one long one.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    period: Duration,
    accumulated: Duration,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "interval timer period must be non-zero");
        Self {
            period,
            accumulated: Duration::ZERO,
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time; returns the number of periods completed
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulated += delta;
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }

    /// Progress toward the next fire in [0, 1)
    pub fn phase(&self) -> f32 {
        self.accumulated.as_secs_f32() / self.period.as_secs_f32()
    }

    /// Stop firing. Safe to call more than once.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }
}
