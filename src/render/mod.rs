mod camera;
mod raycaster;

pub use camera::{Camera, MovementState, CAMERA_ROTATION_SPEED, CAMERA_SPEED, DEFAULT_FOV_Y};
pub use raycaster::RayCaster;

use crate::core::display_context::DisplayContext;
use crate::scene::SceneNode;
use crate::types::Rgba8;

/// Pixels produced for one frame, row-major from the top-left
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub viewport: DisplayContext,
    pub pixels: Vec<Rgba8>,
}

impl RenderOutput {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels[(y * self.viewport.width + x) as usize]
    }
}

/// Turns a composed scene into pixels for a viewport
pub trait SceneRenderer {
    fn render(&mut self, scene: &SceneNode, viewport: &DisplayContext) -> RenderOutput;
}
