use std::time::{Duration, Instant};

/// Wall-clock delta source for the scheduler
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Time elapsed since the previous tick
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        delta
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= Duration::from_millis(9));
    }

    #[test]
    fn test_clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(20));
        clock.reset();

        let delta = clock.tick();
        assert!(delta < Duration::from_millis(20));
    }
}
