use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::animation::AnimationState;
use crate::composer::SceneStats;

use super::node::SceneNode;

/// JSON snapshot of one composed frame for external tooling
#[derive(Debug, Serialize)]
pub struct SceneDump<'a> {
    pub generated_at: String,
    pub state: &'a AnimationState,
    pub stats: SceneStats,
    pub scene: &'a SceneNode,
}

impl<'a> SceneDump<'a> {
    pub fn new(state: &'a AnimationState, scene: &'a SceneNode) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            state,
            stats: SceneStats::of(scene),
            scene,
        }
    }
}

pub fn write_scene_dump(path: &Path, state: &AnimationState, scene: &SceneNode) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create scene dump at {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &SceneDump::new(state, scene))
        .with_context(|| format!("Failed to write scene dump to {}", path.display()))?;
    log::info!("Scene dump written to {}", path.display());
    Ok(())
}
