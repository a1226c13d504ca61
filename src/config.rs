use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationState, SLIDER_MAX, SLIDER_MIN};
use crate::cli::Cli;
use crate::composer::ComposerConfig;
use crate::grid::{GridSpec, SpacingPreset};
use crate::math::Color;

pub const DEFAULT_RENDER_SCALE: u32 = 4;

/// Startup settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scale: u8,
    pub rotation_speed: u8,
    pub color: Color,
    pub rotating: bool,
    pub disco: bool,
    pub outer_count: u32,
    pub outer_spacing: SpacingPreset,
    pub inner_count: u32,
    pub inner_spacing: SpacingPreset,
    pub render_scale: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub show_ui: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 3,
            rotation_speed: 1,
            color: Color::SADDLE_BROWN,
            rotating: true,
            disco: false,
            outer_count: 3,
            outer_spacing: SpacingPreset::Outer,
            inner_count: 2,
            inner_spacing: SpacingPreset::Inner,
            render_scale: DEFAULT_RENDER_SCALE,
            window_width: 800,
            window_height: 600,
            show_ui: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Config file (if any) with command-line overrides applied
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.no_ui {
            self.show_ui = false;
        }
        if let Some(scale) = cli.scale {
            self.scale = scale;
        }
        if let Some(speed) = cli.rotation_speed {
            self.rotation_speed = speed;
        }
        if let Some(color) = cli.color {
            self.color = color;
        }
        if cli.disco {
            self.disco = true;
        }
        if cli.paused {
            self.rotating = false;
        }
        if let Some(preset) = cli.outer_spacing {
            self.outer_spacing = preset;
        }
        if let Some(render_scale) = cli.render_scale {
            self.render_scale = render_scale;
        }
        *self = self.clone().sanitized();
    }

    fn sanitized(mut self) -> Self {
        let clamp = |name: &str, value: u8| {
            let clamped = value.clamp(SLIDER_MIN, SLIDER_MAX);
            if clamped != value {
                log::warn!("{name} {value} out of range, using {clamped}");
            }
            clamped
        };
        self.scale = clamp("scale", self.scale);
        self.rotation_speed = clamp("rotation_speed", self.rotation_speed);
        self.render_scale = self.render_scale.max(1);
        self
    }

    pub fn initial_state(&self) -> AnimationState {
        AnimationState {
            rotating: self.rotating,
            disco_mode: self.disco,
            scale: f32::from(self.scale),
            rotation_speed: f32::from(self.rotation_speed),
            color: self.color,
            ..AnimationState::default()
        }
    }

    pub fn composer_config(&self) -> ComposerConfig {
        ComposerConfig {
            outer_grid: GridSpec::cube(self.outer_count, self.outer_spacing.spacing()),
            inner_grid: GridSpec::cube(self.inner_count, self.inner_spacing.spacing()),
        }
    }
}
