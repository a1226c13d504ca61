use glam::Vec3;
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::display_context::DisplayContext;
use crate::math::Ray;

pub const CAMERA_SPEED: f32 = 0.1;
pub const CAMERA_ROTATION_SPEED: f32 = 0.05;
pub const DEFAULT_FOV_Y: f32 = 75.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl MovementState {
    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            self.to_direction(self.forward, self.backward),
            self.to_direction(self.right, self.left),
            self.to_direction(self.up, self.down),
        )
    }

    const fn rotation_velocity(&self) -> f32 {
        self.to_direction(self.rotate_right, self.rotate_left)
    }

    pub fn is_idle(&self) -> bool {
        self.velocity() == (0.0, 0.0, 0.0) && self.rotation_velocity() == 0.0
    }
}

/// Free-fly perspective camera
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub movement: MovementState,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Five units back on +z, looking at the origin
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            yaw: std::f32::consts::PI,
            pitch: 0.0,
            fov_y: DEFAULT_FOV_Y,
            movement: MovementState::default(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn update(&mut self) {
        let (fwd, right_dir, up_dir) = self.movement.velocity();

        let displacement = self.forward() * fwd * CAMERA_SPEED
            + self.right() * right_dir * CAMERA_SPEED
            + Vec3::Y * up_dir * CAMERA_SPEED;

        self.position += displacement;
        self.yaw += self.movement.rotation_velocity() * CAMERA_ROTATION_SPEED;
    }

    /// Primary ray through the center of pixel (x, y), y growing downward
    pub fn primary_ray(&self, x: u32, y: u32, viewport: &DisplayContext) -> Ray {
        let half_height = (self.fov_y.to_radians() * 0.5).tan();
        let half_width = half_height * viewport.aspect_ratio();

        let u = ((x as f32 + 0.5) / viewport.width as f32) * 2.0 - 1.0;
        let v = 1.0 - ((y as f32 + 0.5) / viewport.height as f32) * 2.0;

        let direction = self.forward() + self.right() * (u * half_width) + self.up() * (v * half_height);
        Ray::new(self.position, direction.normalize())
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyW => self.movement.forward = is_pressed,
                KeyCode::KeyS => self.movement.backward = is_pressed,
                KeyCode::KeyA => self.movement.left = is_pressed,
                KeyCode::KeyD => self.movement.right = is_pressed,
                KeyCode::Space => self.movement.up = is_pressed,
                KeyCode::ShiftLeft => self.movement.down = is_pressed,
                KeyCode::KeyQ => self.movement.rotate_left = is_pressed,
                KeyCode::KeyE => self.movement.rotate_right = is_pressed,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let camera = Camera::new();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!((camera.right() - Vec3::X).length() < 1e-5);
        assert!((camera.up() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::new();
        let viewport = DisplayContext::new(101, 101);
        let ray = camera.primary_ray(50, 50, &viewport);
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_top_left_ray_leans_up_and_left() {
        let camera = Camera::new();
        let ray = camera.primary_ray(0, 0, &DisplayContext::new(64, 48));
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_update_moves_forward() {
        let mut camera = Camera::new();
        camera.movement.forward = true;
        camera.update();
        assert!((camera.position.z - (5.0 - CAMERA_SPEED)).abs() < 1e-5);
        camera.movement = MovementState::default();
        assert!(camera.movement.is_idle());
    }
}
