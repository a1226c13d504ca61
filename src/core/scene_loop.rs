use std::time::Duration;

use crate::animation::{AnimationDriver, AnimationState, UiEvent, BLINK_INTERVAL};
use crate::composer::{compose_with, ComposerConfig};
use crate::core::events::{EventSender, SceneEvent};
use crate::core::scheduler::Scheduler;
use crate::frame::FrameInfo;
use crate::scene::SceneNode;

/// Snapshot handed to the presenter for one frame
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub state: AnimationState,
    pub scene: SceneNode,
}

/// Per-frame sequencing of one scene, independent of any window.
///
/// `begin_frame` queues the blink ticks due so far, applies every pending
/// event and composes. `end_frame` queues the ticks that elapsed while the
/// frame was being presented ahead of the UI changes made during it, so a
/// tick from before a click can never override the click.
#[derive(Debug)]
pub struct SceneLoop {
    composer: ComposerConfig,
    driver: AnimationDriver,
    scheduler: Scheduler,
    ui_events: EventSender,
}

impl SceneLoop {
    pub fn new(initial: AnimationState, composer: ComposerConfig) -> Self {
        let driver = AnimationDriver::new(initial);
        let scheduler = Scheduler::new(driver.sender(), BLINK_INTERVAL);
        let ui_events = driver.sender();

        Self {
            composer,
            driver,
            scheduler,
            ui_events,
        }
    }

    pub fn state(&self) -> &AnimationState {
        self.driver.state()
    }

    pub fn composer(&self) -> &ComposerConfig {
        &self.composer
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn begin_frame(&mut self) -> FrameInput {
        self.scheduler.poll();
        self.compose_pending()
    }

    /// `begin_frame` with an explicit elapsed time instead of the wall clock
    pub fn begin_frame_after(&mut self, elapsed: Duration) -> FrameInput {
        self.scheduler.advance(elapsed);
        self.compose_pending()
    }

    /// Close a frame. Only a presented frame advances the rotation.
    pub fn end_frame(&mut self, ui_events: Vec<UiEvent>, presented: bool) -> Option<FrameInfo> {
        self.scheduler.poll();
        self.finish(ui_events, presented)
    }

    /// `end_frame` with an explicit elapsed time instead of the wall clock
    pub fn end_frame_after(&mut self, elapsed: Duration, ui_events: Vec<UiEvent>, presented: bool) -> Option<FrameInfo> {
        self.scheduler.advance(elapsed);
        self.finish(ui_events, presented)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    fn compose_pending(&mut self) -> FrameInput {
        let state = self.driver.process_pending();
        FrameInput {
            scene: compose_with(&self.composer, &state),
            state,
        }
    }

    fn finish(&mut self, ui_events: Vec<UiEvent>, presented: bool) -> Option<FrameInfo> {
        for event in ui_events {
            self.ui_events.send(SceneEvent::Ui(event));
        }
        if !presented {
            return None;
        }
        self.scheduler.frame_presented()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::SceneStats;

    fn scene_loop() -> SceneLoop {
        SceneLoop::new(AnimationState::default(), ComposerConfig::default())
    }

    #[test]
    fn test_ui_event_applies_next_frame() {
        let mut scene = scene_loop();
        scene.begin_frame_after(Duration::ZERO);
        scene.end_frame_after(Duration::ZERO, vec![UiEvent::SetScale(5)], true);

        let frame = scene.begin_frame_after(Duration::ZERO);
        assert_eq!(frame.state.scale, 5.0);
    }

    #[test]
    fn test_unpresented_frame_does_not_rotate() {
        let mut scene = scene_loop();
        scene.begin_frame_after(Duration::ZERO);
        assert!(scene.end_frame_after(Duration::ZERO, Vec::new(), false).is_none());

        let frame = scene.begin_frame_after(Duration::ZERO);
        assert_eq!(frame.state.rotation_angle, 0.0);
    }

    #[test]
    fn test_failed_frame_still_applies_ui_events() {
        let mut scene = scene_loop();
        scene.begin_frame_after(Duration::ZERO);
        scene.end_frame_after(Duration::ZERO, vec![UiEvent::ToggleRotating], false);

        let frame = scene.begin_frame_after(Duration::ZERO);
        assert!(!frame.state.rotating);
    }

    #[test]
    fn test_presented_frame_rotates() {
        let mut scene = scene_loop();
        scene.begin_frame_after(Duration::ZERO);
        assert!(scene.end_frame_after(Duration::ZERO, Vec::new(), true).is_some());

        let frame = scene.begin_frame_after(Duration::ZERO);
        assert!(frame.state.rotation_angle > 0.0);
    }

    #[test]
    fn test_enabling_disco_mid_frame_starts_lit() {
        let mut scene = scene_loop();
        scene.begin_frame_after(Duration::ZERO);
        // A blink period boundary passes while the frame that carried the click is presented
        scene.end_frame_after(Duration::from_millis(110), vec![UiEvent::ToggleDisco], true);

        let frame = scene.begin_frame_after(Duration::ZERO);
        assert!(frame.state.disco_mode);
        assert!(frame.state.visible);
        assert_eq!(SceneStats::of(&frame.scene).lights(), 2);
    }

    #[test]
    fn test_stop_halts_clocks() {
        let mut scene = scene_loop();
        scene.stop();
        assert!(!scene.is_running());
        assert!(scene.end_frame_after(Duration::from_secs(1), Vec::new(), true).is_none());
    }
}
