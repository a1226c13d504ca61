use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::{Affine3A, Vec3};
use serde::Serialize;

use crate::math::{max_scale, Color, Transform};
use crate::types::{Geometry, Material};

/// Index of a part inside its figure's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PartId(pub usize);

/// Coat color or one of the fixed accent colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Coat,
    Fixed(Accent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accent {
    Black,
    White,
}

struct PartSpec {
    name: &'static str,
    parent: Option<usize>,
    geometry: Geometry,
    paint: Paint,
    position: [f32; 3],
    rotation: [f32; 3],
}

const NO_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

/// The dog, parent-first. Positions and rotations are relative to the parent.
const PARTS: [PartSpec; 14] = [
    PartSpec {
        name: "corpus",
        parent: None,
        geometry: Geometry::cuboid(1.0, 3.0, 1.0),
        paint: Paint::Coat,
        position: [0.0, 0.0, 0.0],
        rotation: [FRAC_PI_2, 0.0, 0.0],
    },
    PartSpec {
        name: "head",
        parent: Some(0),
        geometry: Geometry::sphere(0.8),
        paint: Paint::Coat,
        position: [0.0, 1.5, 0.0],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "nose",
        parent: Some(1),
        geometry: Geometry::sphere(0.1),
        paint: Paint::Fixed(Accent::Black),
        position: [0.0, 0.85, 0.0],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "left eye",
        parent: Some(1),
        geometry: Geometry::sphere(0.1),
        paint: Paint::Fixed(Accent::White),
        position: [-0.3, 0.7, -0.3],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "left iris",
        parent: Some(3),
        geometry: Geometry::sphere(0.04),
        paint: Paint::Fixed(Accent::Black),
        position: [0.0, 0.08, 0.0],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "right eye",
        parent: Some(1),
        geometry: Geometry::sphere(0.1),
        paint: Paint::Fixed(Accent::White),
        position: [0.3, 0.7, -0.3],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "right iris",
        parent: Some(5),
        geometry: Geometry::sphere(0.04),
        paint: Paint::Fixed(Accent::Black),
        position: [0.0, 0.08, 0.0],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "right ear",
        parent: Some(1),
        geometry: Geometry::sphere(0.2),
        paint: Paint::Coat,
        position: [-0.5, 0.3, -0.7],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "left ear",
        parent: Some(1),
        geometry: Geometry::sphere(0.2),
        paint: Paint::Coat,
        position: [0.5, 0.3, -0.7],
        rotation: NO_ROTATION,
    },
    PartSpec {
        name: "front right leg",
        parent: Some(0),
        geometry: Geometry::cuboid(0.1, 1.5, 0.1),
        paint: Paint::Coat,
        position: [-0.5, 0.8, 0.5],
        rotation: [FRAC_PI_4, 0.0, FRAC_PI_4],
    },
    PartSpec {
        name: "front left leg",
        parent: Some(0),
        geometry: Geometry::cuboid(0.1, 1.5, 0.1),
        paint: Paint::Coat,
        position: [0.5, 0.8, 0.5],
        rotation: [-FRAC_PI_4 * 3.0, 0.0, -FRAC_PI_4 * 3.0],
    },
    PartSpec {
        name: "back left leg",
        parent: Some(0),
        geometry: Geometry::cuboid(0.1, 1.5, 0.1),
        paint: Paint::Coat,
        position: [0.5, -0.8, 0.5],
        rotation: [FRAC_PI_4 * 3.0, 0.0, FRAC_PI_4 * 3.0],
    },
    PartSpec {
        name: "back right leg",
        parent: Some(0),
        geometry: Geometry::cuboid(0.1, 1.5, 0.1),
        paint: Paint::Coat,
        position: [-0.5, -0.8, 0.5],
        rotation: [-FRAC_PI_4, 0.0, -FRAC_PI_4],
    },
    PartSpec {
        name: "tail",
        parent: Some(0),
        geometry: Geometry::cuboid(0.1, 0.1, 2.0),
        paint: Paint::Coat,
        position: [0.0, -1.6, -1.0],
        rotation: [-PI / 6.0, 0.0, FRAC_PI_2],
    },
];

/// One primitive of a figure, placed relative to its parent part
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub name: &'static str,
    pub parent: Option<PartId>,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

/// Arena of parts; every parent is stored before its children and index 0
/// is the root (the corpus)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    parts: Vec<Part>,
}

/// Build the dog with `color` as its coat. Nose and irises stay black, eye
/// whites stay white.
pub fn build_figure(color: Color) -> Figure {
    let parts = PARTS
        .iter()
        .map(|spec| {
            let color = match spec.paint {
                Paint::Coat => color,
                Paint::Fixed(Accent::Black) => Color::BLACK,
                Paint::Fixed(Accent::White) => Color::WHITE,
            };
            let [rx, ry, rz] = spec.rotation;

            Part {
                name: spec.name,
                parent: spec.parent.map(PartId),
                geometry: spec.geometry,
                material: Material::new(color),
                transform: Transform::from_position(Vec3::from_array(spec.position))
                    .with_rotation(rx, ry, rz),
            }
        })
        .collect();

    Figure { parts }
}

impl Figure {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn root(&self) -> &Part {
        &self.parts[0]
    }

    pub fn part(&self, id: PartId) -> &Part {
        &self.parts[id.0]
    }

    pub fn find(&self, name: &str) -> Option<(PartId, &Part)> {
        self.parts
            .iter()
            .enumerate()
            .find(|(_, part)| part.name == name)
            .map(|(index, part)| (PartId(index), part))
    }

    pub fn children(&self, id: PartId) -> impl Iterator<Item = (PartId, &Part)> + '_ {
        self.parts
            .iter()
            .enumerate()
            .filter(move |(_, part)| part.parent == Some(id))
            .map(|(index, part)| (PartId(index), part))
    }

    /// Resolve every part's world matrix under `root`, indexed like `parts()`
    pub fn world_transforms(&self, root: &Affine3A) -> Vec<Affine3A> {
        let mut worlds: Vec<Affine3A> = Vec::with_capacity(self.parts.len());
        for (index, part) in self.parts.iter().enumerate() {
            let parent = match part.parent {
                Some(PartId(p)) => {
                    assert!(p < index, "part {:?} listed before its parent", part.name);
                    worlds[p]
                }
                None => *root,
            };
            worlds.push(part.transform.world_matrix(&parent));
        }
        worlds
    }

    /// Radius of a sphere around the figure origin enclosing every part
    pub fn bounding_radius(&self) -> f32 {
        self.world_transforms(&Affine3A::IDENTITY)
            .iter()
            .zip(&self.parts)
            .map(|(world, part)| {
                world.translation.length() + part.geometry.bounding_radius() * max_scale(world)
            })
            .fold(0.0, f32::max)
    }
}
