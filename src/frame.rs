use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: Duration,
    pub delta: Duration,
}

impl FrameInfo {
    pub fn new(number: u64, time: Duration, delta: Duration) -> Self {
        Self { number, time, delta }
    }

    pub fn fps(&self) -> f32 {
        let secs = self.delta.as_secs_f32();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

/// Counts presented frames. Once detached it stops producing frames, which
/// is how the frame-rate clock is cancelled on teardown.
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    attached: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            attached: true,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Record a presented frame
    pub fn present(&mut self) -> Option<FrameInfo> {
        if !self.attached {
            return None;
        }

        let now = Instant::now();
        let info = FrameInfo::new(
            self.frame_number,
            now.duration_since(self.start_time),
            now.duration_since(self.last_frame_time),
        );

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
