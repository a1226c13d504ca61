use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::composer::{compose_with, SceneStats};
use crate::config::Config;
use crate::core::scene_loop::SceneLoop;
use crate::viewer::Viewer;

const FPS_SMOOTHING: f32 = 0.1;

/// One running scene: its frame loop and the window showing it
pub struct App {
    config: Config,
    scene: SceneLoop,
    viewer: Option<Viewer>,
    fps: f32,
}

impl App {
    pub fn new(config: Config) -> Self {
        let scene = SceneLoop::new(config.initial_state(), config.composer_config());

        let stats = SceneStats::of(&compose_with(scene.composer(), scene.state()));
        log::info!(
            "Scene: {} figures, {} parts, {} lights",
            stats.figures,
            stats.parts,
            stats.lights()
        );

        Self {
            config,
            scene,
            viewer: None,
            fps: 0.0,
        }
    }

    fn redraw(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let frame = self.scene.begin_frame();
        viewer.camera_mut().update();

        let mut ui_events = Vec::new();
        let presented = match viewer.render(&frame.scene, &frame.state, self.fps, &mut ui_events) {
            Ok(presented) => presented,
            // The previous frame stays on screen
            Err(e) => {
                log::error!("Render error: {e:#}");
                false
            }
        };

        if let Some(info) = self.scene.end_frame(ui_events, presented) {
            self.fps += (info.fps() - self.fps) * FPS_SMOOTHING;
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.scene.stop();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Dog Grid")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.shutdown(event_loop);
                return;
            }
        };

        match Viewer::new(window, self.config.show_ui, self.config.render_scale) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                log::error!("Failed to initialize viewer: {e:#}");
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(viewer) = self.viewer.as_mut() {
            if viewer.on_window_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.camera_mut().process_keyboard(&event);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.stop();
    }
}
