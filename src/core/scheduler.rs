use std::time::Duration;

use crate::core::clock::Clock;
use crate::core::events::{EventSender, SceneEvent};
use crate::core::timer::IntervalTimer;
use crate::frame::{FrameClock, FrameInfo};

const MAX_TICK_BURST: u32 = 2;

/// Turns presented frames and elapsed wall-clock time into scene events.
/// Owns both clocks of one scene instance; `stop` cancels them together.
#[derive(Debug)]
pub struct Scheduler {
    frames: FrameClock,
    blink: IntervalTimer,
    clock: Clock,
    events: EventSender,
}

impl Scheduler {
    pub fn new(events: EventSender, blink_interval: Duration) -> Self {
        Self {
            frames: FrameClock::new(),
            blink: IntervalTimer::new(blink_interval),
            clock: Clock::new(),
            events,
        }
    }

    pub fn is_running(&self) -> bool {
        self.blink.is_running() && self.frames.is_attached()
    }

    /// Advance by the wall-clock time since the previous poll
    pub fn poll(&mut self) -> u32 {
        let delta = self.clock.tick();
        self.advance(delta)
    }

    /// Advance by `delta`; returns the number of blink periods elapsed.
    /// Long stalls are collapsed to at most `MAX_TICK_BURST` ticks with the
    /// same parity, which leaves visibility where the full burst would.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        let fired = self.blink.advance(delta);
        let emitted = if fired > MAX_TICK_BURST {
            let collapsed = MAX_TICK_BURST - (fired - MAX_TICK_BURST) % 2;
            log::debug!("Collapsed {fired} missed blink periods into {collapsed} ticks");
            collapsed
        } else {
            fired
        };
        for _ in 0..emitted {
            self.events.send(SceneEvent::BlinkTick);
        }
        fired
    }

    /// Report a presented frame; emits one frame event
    pub fn frame_presented(&mut self) -> Option<FrameInfo> {
        let info = self.frames.present()?;
        self.events.send(SceneEvent::Frame);
        Some(info)
    }

    /// Cancel both clocks. Later calls emit nothing.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Stopping scene clocks after {} frames", self.frames.frame_number());
        }
        self.blink.stop();
        self.frames.detach();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventQueue;

    #[test]
    fn test_advance_emits_blink_ticks() {
        let queue = EventQueue::new();
        let mut scheduler = Scheduler::new(queue.sender(), Duration::from_millis(100));

        assert_eq!(scheduler.advance(Duration::from_millis(250)), 2);
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events, [SceneEvent::BlinkTick, SceneEvent::BlinkTick]);
    }

    #[test]
    fn test_long_stall_collapses_ticks_keeping_parity() {
        let queue = EventQueue::new();
        let mut scheduler = Scheduler::new(queue.sender(), Duration::from_millis(100));

        assert_eq!(scheduler.advance(Duration::from_secs(3600)), 36_000);
        assert_eq!(queue.drain().count(), 2);

        assert_eq!(scheduler.advance(Duration::from_millis(3300)), 33);
        assert_eq!(queue.drain().count(), 1);
    }

    #[test]
    fn test_frames_emit_frame_events() {
        let queue = EventQueue::new();
        let mut scheduler = Scheduler::new(queue.sender(), Duration::from_millis(100));

        scheduler.frame_presented();
        scheduler.frame_presented();
        assert_eq!(queue.drain().filter(|e| *e == SceneEvent::Frame).count(), 2);
    }

    #[test]
    fn test_stop_silences_both_clocks() {
        let queue = EventQueue::new();
        let mut scheduler = Scheduler::new(queue.sender(), Duration::from_millis(100));
        scheduler.stop();
        scheduler.stop();

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 0);
        assert!(scheduler.frame_presented().is_none());
        assert_eq!(queue.drain().count(), 0);
    }
}
