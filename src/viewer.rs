use std::sync::Arc;

use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::animation::{AnimationState, UiEvent};
use crate::composer::SceneStats;
use crate::core::surface_renderer::SurfaceRenderer;
use crate::render::{Camera, RayCaster, SceneRenderer};
use crate::scene::SceneNode;
use crate::ui::{control_panel, PanelInfo, UiOverlay};

/// Window presentation: ray casts the scene at reduced resolution, blits it
/// and draws the control panel on top
pub struct Viewer {
    window: Arc<Window>,
    surface: SurfaceRenderer,
    overlay: Option<UiOverlay>,
    renderer: RayCaster,
    render_scale: u32,
}

impl Viewer {
    pub fn new(window: Arc<Window>, show_ui: bool, render_scale: u32) -> Result<Self> {
        let surface = SurfaceRenderer::new(window.clone())?;
        let overlay = show_ui.then(|| UiOverlay::new(&window, surface.gpu(), surface.surface_format()));

        Ok(Self {
            window,
            surface,
            overlay,
            renderer: RayCaster::default(),
            render_scale: render_scale.max(1),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.renderer.camera
    }

    /// Returns true when the control panel consumed the event
    pub fn on_window_event(&mut self, event: &WindowEvent) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.on_window_event(&self.window, event),
            None => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    /// Render and present one frame. Control changes made in it land in
    /// `ui_events` even when presenting fails. Returns false when the
    /// surface had to be reconfigured and nothing was shown.
    pub fn render(
        &mut self,
        scene: &SceneNode,
        state: &AnimationState,
        fps: f32,
        ui_events: &mut Vec<UiEvent>,
    ) -> Result<bool> {
        let viewport = self.surface.surface_size().scaled_down(self.render_scale);
        let frame = self.renderer.render(scene, &viewport);
        self.surface.upload(frame.as_bytes(), frame.viewport)?;

        let info = PanelInfo {
            fps,
            stats: SceneStats::of(scene),
            render_size: viewport,
        };

        let ui_output = match self.overlay.as_mut() {
            Some(overlay) => Some(overlay.run(&self.window, |ctx| {
                ui_events.extend(control_panel(ctx, state, &info));
            })),
            None => None,
        };

        let window = &self.window;
        let overlay = &mut self.overlay;
        self.surface.present_with(|gpu, encoder, view| match (overlay.as_mut(), ui_output) {
            (Some(overlay), Some(output)) => overlay.paint(window, output, gpu, encoder, view),
            _ => Vec::new(),
        })
    }
}
