pub mod animation;
pub mod app;
pub mod cli;
pub mod composer;
pub mod config;
pub mod core;
pub mod figure;
pub mod frame;
pub mod grid;
pub mod math;
pub mod render;
pub mod scene;
pub mod types;
pub mod ui;
pub mod viewer;

pub use animation::{AnimationDriver, AnimationState, UiEvent};
pub use composer::{compose, compose_with, ComposerConfig, SceneStats};
pub use figure::{build_figure, Figure};
pub use grid::{replicate, GridIndex, GridSpec, Spacing, SpacingPreset};
pub use scene::SceneNode;
