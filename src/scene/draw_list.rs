use glam::{Affine3A, Mat3A, Vec3};

use crate::math::{max_scale, Color};
use crate::types::{Geometry, Light};

use super::node::{NodeKind, SceneNode};

/// One primitive resolved to world space
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub geometry: Geometry,
    pub color: Color,
    pub world_to_local: Affine3A,
    /// Maps local normals to world normals (inverse transpose)
    pub normal_matrix: Mat3A,
}

/// All primitives of one figure plus a world-space bounding sphere
#[derive(Debug, Clone)]
pub struct FigureBatch {
    pub center: Vec3,
    pub radius: f32,
    pub items: Vec<DrawItem>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightInstance {
    Ambient { color: Color, intensity: f32 },
    Point { position: Vec3, color: Color, intensity: f32 },
}

/// Flattened, renderer-facing view of a scene graph
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub batches: Vec<FigureBatch>,
    pub lights: Vec<LightInstance>,
}

impl DrawList {
    pub fn from_scene(root: &SceneNode) -> Self {
        let mut list = DrawList::default();

        root.visit(&Affine3A::IDENTITY, &mut |node: &SceneNode, world: &Affine3A| match &node.kind {
            NodeKind::Group => {}
            NodeKind::Light(Light::Ambient { color, intensity }) => {
                list.lights.push(LightInstance::Ambient {
                    color: *color,
                    intensity: *intensity,
                });
            }
            NodeKind::Light(Light::Point { color, intensity }) => {
                list.lights.push(LightInstance::Point {
                    position: world.translation.into(),
                    color: *color,
                    intensity: *intensity,
                });
            }
            NodeKind::Figure(figure) => {
                let items = figure
                    .world_transforms(world)
                    .iter()
                    .zip(figure.parts())
                    .map(|(part_world, part)| {
                        let world_to_local = part_world.inverse();
                        DrawItem {
                            geometry: part.geometry,
                            color: part.material.color,
                            world_to_local,
                            normal_matrix: world_to_local.matrix3.transpose(),
                        }
                    })
                    .collect();

                list.batches.push(FigureBatch {
                    center: world.translation.into(),
                    radius: figure.bounding_radius() * max_scale(world),
                    items,
                });
            }
        });

        list
    }

    pub fn item_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.items.len()).sum()
    }
}
