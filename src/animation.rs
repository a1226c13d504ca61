use std::f32::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::events::{EventQueue, EventSender, SceneEvent};
use crate::math::Color;

/// Radians added to the rotation angle per presented frame at speed 1
pub const BASE_ROTATION_RATE: f32 = 0.03;

/// Wall-clock period of the disco blink
pub const BLINK_INTERVAL: Duration = Duration::from_millis(100);

pub const SLIDER_MIN: u8 = 1;
pub const SLIDER_MAX: u8 = 5;

/// User controls. Slider values are clamped to 1..=5 when built through the
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    ToggleDisco,
    ToggleRotating,
    SetScale(u8),
    SetRotationSpeed(u8),
    SetColor(Color),
}

impl UiEvent {
    pub fn scale(value: i64) -> Self {
        UiEvent::SetScale(clamp_slider(value))
    }

    pub fn rotation_speed(value: i64) -> Self {
        UiEvent::SetRotationSpeed(clamp_slider(value))
    }
}

fn clamp_slider(value: i64) -> u8 {
    value.clamp(SLIDER_MIN as i64, SLIDER_MAX as i64) as u8
}

/// Shared configuration of one running scene. Copying it yields the
/// snapshot a frame is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub rotation_angle: f32,
    pub visible: bool,
    pub rotating: bool,
    pub disco_mode: bool,
    pub scale: f32,
    pub rotation_speed: f32,
    pub color: Color,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            rotation_angle: 0.0,
            visible: true,
            rotating: true,
            disco_mode: false,
            scale: 3.0,
            rotation_speed: 1.0,
            color: Color::SADDLE_BROWN,
        }
    }
}

impl AnimationState {
    /// Frame clock tick: advance the rotation while rotating
    pub fn on_frame(&mut self) {
        if self.rotating {
            let step = BASE_ROTATION_RATE * self.rotation_speed;
            self.rotation_angle = (self.rotation_angle + step).rem_euclid(TAU);
        }
    }

    /// Interval tick: blink while in disco mode, otherwise stay lit
    pub fn on_blink_tick(&mut self) {
        self.visible = if self.disco_mode { !self.visible } else { true };
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::ToggleDisco => {
                self.disco_mode = !self.disco_mode;
                // Never start or end a disco toggle in the dark
                self.visible = true;
                log::info!("Disco mode {}", if self.disco_mode { "on" } else { "off" });
            }
            UiEvent::ToggleRotating => {
                self.rotating = !self.rotating;
                log::info!("Rotation {}", if self.rotating { "resumed" } else { "paused" });
            }
            UiEvent::SetScale(value) => {
                self.scale = f32::from(value);
                log::info!("Scale set to {value}");
            }
            UiEvent::SetRotationSpeed(value) => {
                self.rotation_speed = f32::from(value);
                log::info!("Rotation speed set to {value}");
            }
            UiEvent::SetColor(color) => {
                self.color = color;
                log::info!("Color set to {color}");
            }
        }
    }

    pub fn handle(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Frame => self.on_frame(),
            SceneEvent::BlinkTick => self.on_blink_tick(),
            SceneEvent::Ui(ui) => self.apply(ui),
        }
    }
}

/// Sole owner of the scene's `AnimationState`. Clocks and UI push events
/// through senders; the driver applies them in arrival order.
#[derive(Debug)]
pub struct AnimationDriver {
    state: AnimationState,
    queue: EventQueue,
}

impl AnimationDriver {
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            queue: EventQueue::new(),
        }
    }

    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Apply everything queued so far and return the resulting snapshot
    pub fn process_pending(&mut self) -> AnimationState {
        let mut applied = 0usize;
        for event in self.queue.drain() {
            self.state.handle(event);
            applied += 1;
        }
        if applied > 0 {
            log::trace!("Applied {applied} scene events");
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = AnimationState::default();
        assert!(state.rotating);
        assert!(!state.disco_mode);
        assert!(state.visible);
        assert_eq!(state.scale, 3.0);
        assert_eq!(state.rotation_speed, 1.0);
        assert_eq!(state.color, Color::SADDLE_BROWN);
        assert_eq!(state.rotation_angle, 0.0);
    }

    #[test]
    fn test_frame_advances_by_rate_times_speed() {
        let mut state = AnimationState {
            rotation_speed: 2.0,
            ..Default::default()
        };
        state.on_frame();
        assert!((state.rotation_angle - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_wraps_below_tau() {
        let mut state = AnimationState {
            rotation_angle: TAU - 0.01,
            ..Default::default()
        };
        state.on_frame();
        assert!(state.rotation_angle >= 0.0 && state.rotation_angle < TAU);
        assert!((state.rotation_angle - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_paused_rotation_is_frozen() {
        let mut state = AnimationState {
            rotating: false,
            rotation_angle: 1.25,
            ..Default::default()
        };
        for _ in 0..100 {
            state.on_frame();
        }
        assert_eq!(state.rotation_angle, 1.25);
    }

    #[test]
    fn test_blink_tick_without_disco_forces_visible() {
        let mut state = AnimationState {
            visible: false,
            ..Default::default()
        };
        state.on_blink_tick();
        assert!(state.visible);
    }

    #[test]
    fn test_toggle_disco_lights_scene_immediately() {
        let mut state = AnimationState {
            visible: false,
            ..Default::default()
        };
        state.apply(UiEvent::ToggleDisco);
        assert!(state.disco_mode);
        assert!(state.visible);

        state.on_blink_tick();
        assert!(!state.visible);
        state.on_blink_tick();
        assert!(state.visible);
    }

    #[test]
    fn test_slider_constructors_clamp() {
        assert_eq!(UiEvent::scale(0), UiEvent::SetScale(1));
        assert_eq!(UiEvent::scale(9), UiEvent::SetScale(5));
        assert_eq!(UiEvent::rotation_speed(3), UiEvent::SetRotationSpeed(3));
    }

    #[test]
    fn test_driver_applies_events_in_order() {
        let mut driver = AnimationDriver::new(AnimationState::default());
        let sender = driver.sender();

        sender.send(SceneEvent::Ui(UiEvent::SetColor(Color::WHITE)));
        sender.send(SceneEvent::Ui(UiEvent::SetColor(Color::BLACK)));
        sender.send(SceneEvent::Frame);

        let snapshot = driver.process_pending();
        assert_eq!(snapshot.color, Color::BLACK);
        assert!((snapshot.rotation_angle - BASE_ROTATION_RATE).abs() < 1e-6);
        assert_eq!(driver.state(), &snapshot);
    }

    #[test]
    fn test_driver_snapshot_is_detached() {
        let mut driver = AnimationDriver::new(AnimationState::default());
        let before = driver.process_pending();
        driver.sender().send(SceneEvent::Ui(UiEvent::ToggleRotating));
        driver.process_pending();
        assert!(before.rotating);
        assert!(!driver.state().rotating);
    }
}
