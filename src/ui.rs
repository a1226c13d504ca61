use wgpu::{CommandBuffer, CommandEncoder, TextureView};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::animation::{AnimationState, UiEvent, SLIDER_MAX, SLIDER_MIN};
use crate::composer::SceneStats;
use crate::core::display_context::DisplayContext;
use crate::core::gpu_context::GpuContext;
use crate::math::Color;

/// Read-only figures shown under the controls
#[derive(Debug, Clone, Copy)]
pub struct PanelInfo {
    pub fps: f32,
    pub stats: SceneStats,
    pub render_size: DisplayContext,
}

/// Draw the control panel and collect what the user changed this frame
pub fn control_panel(ctx: &egui::Context, state: &AnimationState, info: &PanelInfo) -> Vec<UiEvent> {
    let mut events = Vec::new();

    egui::Window::new("Controls")
        .title_bar(true)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            if ui.button("toggle disco").clicked() {
                events.push(UiEvent::ToggleDisco);
            }
            if ui.button("toggle rotating").clicked() {
                events.push(UiEvent::ToggleRotating);
            }

            let range = i64::from(SLIDER_MIN)..=i64::from(SLIDER_MAX);

            let mut scale = state.scale.round() as i64;
            if ui.add(egui::Slider::new(&mut scale, range.clone()).text("scale")).changed() {
                events.push(UiEvent::scale(scale));
            }

            let mut speed = state.rotation_speed.round() as i64;
            if ui.add(egui::Slider::new(&mut speed, range).text("rotation speed")).changed() {
                events.push(UiEvent::rotation_speed(speed));
            }

            ui.horizontal(|ui| {
                let mut rgb = state.color.to_rgb8();
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    events.push(UiEvent::SetColor(Color::from_rgb8(rgb[0], rgb[1], rgb[2])));
                }
                ui.label("set color");
            });

            ui.add_space(5.0);
            ui.separator();

            ui.monospace(format!("{:.0} FPS", info.fps));
            ui.monospace(format!("Figures: {}", info.stats.figures));
            ui.monospace(format!("Parts: {}", info.stats.parts));
            ui.monospace(format!(
                "Resolution: {}x{}",
                info.render_size.width, info.render_size.height
            ));
            if state.disco_mode {
                ui.label(egui::RichText::new("DISCO").color(egui::Color32::from_rgb(255, 100, 200)));
            }
        });

    events
}

/// Texture uploads and frees carried until a frame is actually painted.
/// egui only sends each delta once, so a skipped frame must not drop it.
#[derive(Default)]
pub struct PendingTextures {
    delta: egui::TexturesDelta,
}

impl PendingTextures {
    pub fn defer(&mut self, output: &mut egui::FullOutput) {
        self.delta.append(std::mem::take(&mut output.textures_delta));
    }

    pub fn take(&mut self) -> egui::TexturesDelta {
        std::mem::take(&mut self.delta)
    }

    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }
}

/// egui context plus its winit input adapter and wgpu painter
pub struct UiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    textures: PendingTextures,
}

impl UiOverlay {
    pub fn new(window: &Window, gpu: &GpuContext, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(gpu.device(), format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            state,
            renderer,
            textures: PendingTextures::default(),
        }
    }

    /// Returns true when egui consumed the event
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one UI pass. Texture changes are held until the next `paint`.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        let mut output = self.ctx.run(raw_input, build);
        self.state
            .handle_platform_output(window, std::mem::take(&mut output.platform_output));
        self.textures.defer(&mut output);
        output
    }

    /// Record the UI on top of `view`; returns egui's own command buffers
    pub fn paint(
        &mut self,
        window: &Window,
        output: egui::FullOutput,
        gpu: &GpuContext,
        encoder: &mut CommandEncoder,
        view: &TextureView,
    ) -> Vec<CommandBuffer> {
        let textures = self.textures.take();
        let tris = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        for (id, image_delta) in &textures.set {
            self.renderer.update_texture(gpu.device(), gpu.queue(), *id, image_delta);
        }

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: output.pixels_per_point,
        };
        let commands = self
            .renderer
            .update_buffers(gpu.device(), gpu.queue(), encoder, &tris, &screen_descriptor);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &textures.free {
            self.renderer.free_texture(id);
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> PanelInfo {
        PanelInfo {
            fps: 60.0,
            stats: SceneStats::default(),
            render_size: DisplayContext::new(200, 150),
        }
    }

    #[test]
    fn test_panel_without_input_emits_nothing() {
        let ctx = egui::Context::default();
        let state = AnimationState::default();
        let mut events = Vec::new();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events = control_panel(ctx, &state, &info());
        });

        assert!(events.is_empty());
    }

    #[test]
    fn test_skipped_frames_keep_texture_uploads() {
        let ctx = egui::Context::default();
        let state = AnimationState::default();
        let mut pending = PendingTextures::default();

        let mut first = ctx.run(egui::RawInput::default(), |ctx| {
            control_panel(ctx, &state, &info());
        });
        let first_sets = first.textures_delta.set.len();
        pending.defer(&mut first);
        assert!(first.textures_delta.set.is_empty());

        let mut second = ctx.run(egui::RawInput::default(), |ctx| {
            control_panel(ctx, &state, &info());
        });
        let second_sets = second.textures_delta.set.len();
        pending.defer(&mut second);

        let textures = pending.take();
        assert_eq!(textures.set.len(), first_sets + second_sets);
        assert!(pending.is_empty());
    }
}
