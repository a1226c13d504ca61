use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;
use crate::figure::build_figure;
use crate::grid::{replicate, GridSpec, Spacing};
use crate::math::Transform;
use crate::scene::{NodeKind, SceneNode};
use crate::types::Light;

/// Fixed tilt of the whole arrangement (x, y, z)
pub const OUTER_ROTATION: Vec3 = Vec3::new(PI / 5.0, FRAC_PI_4, 0.0);
/// Outer node scale is `state.scale * OUTER_SCALE_FACTOR`
pub const OUTER_SCALE_FACTOR: f32 = 0.3;
/// Scale of the spinning wrapper inside every outer cell
pub const INNER_WRAPPER_SCALE: f32 = 0.3;
pub const FIGURE_SCALE: f32 = 0.2;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    pub outer_grid: GridSpec,
    pub inner_grid: GridSpec,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            outer_grid: GridSpec::cube(3, Spacing::OUTER),
            inner_grid: GridSpec::cube(2, Spacing::INNER),
        }
    }
}

/// Node counts of a composed tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub groups: usize,
    pub figures: usize,
    pub parts: usize,
    pub ambient_lights: usize,
    pub point_lights: usize,
}

impl SceneStats {
    pub fn of(root: &SceneNode) -> Self {
        let mut stats = SceneStats::default();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match &node.kind {
                NodeKind::Group => stats.groups += 1,
                NodeKind::Figure(figure) => {
                    stats.figures += 1;
                    stats.parts += figure.len();
                }
                NodeKind::Light(Light::Ambient { .. }) => stats.ambient_lights += 1,
                NodeKind::Light(Light::Point { .. }) => stats.point_lights += 1,
            }
            stack.extend(node.children.iter());
        }
        stats
    }

    pub fn lights(&self) -> usize {
        self.ambient_lights + self.point_lights
    }
}

/// Compose the scene for one state snapshot with the default grids
pub fn compose(state: &AnimationState) -> SceneNode {
    compose_with(&ComposerConfig::default(), state)
}

/// Build a fresh tree from `state`. Nothing is retained between calls.
pub fn compose_with(config: &ComposerConfig, state: &AnimationState) -> SceneNode {
    let mut root = SceneNode::group("scene");

    // Lights are left out entirely while the scene is blinked off
    if state.visible {
        root.push(SceneNode::light("ambient", Light::ambient()));
        root.push(SceneNode::light("point", Light::point()).with_position(POINT_LIGHT_POSITION));
    }

    let inner_wrapper = Transform::default()
        .with_rotation(0.0, state.rotation_angle, 0.0)
        .with_scale(INNER_WRAPPER_SCALE);
    let figure_transform = Transform::default().with_scale(FIGURE_SCALE);
    let figure = build_figure(state.color);

    let outer_grid = replicate("outer", &config.outer_grid, |_| {
        let inner_grid = replicate("inner", &config.inner_grid, |_| {
            SceneNode::figure("dog", figure.clone()).with_transform(figure_transform)
        });
        SceneNode::group("spinner")
            .with_transform(inner_wrapper)
            .with_child(inner_grid)
    });

    let dogs = SceneNode::group("dogs")
        .with_transform(
            Transform::default()
                .with_rotation(OUTER_ROTATION.x, OUTER_ROTATION.y, OUTER_ROTATION.z)
                .with_scale(state.scale * OUTER_SCALE_FACTOR),
        )
        .with_child(outer_grid);
    root.push(dogs);

    if log::log_enabled!(log::Level::Trace) {
        log::trace!("Composed scene: {:?}", SceneStats::of(&root));
    }
    root
}
