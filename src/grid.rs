use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::SceneNode;

/// Placement rule along one axis:
/// `offset = -(count / 2) + index / divisor + count * shift + bias`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpacing {
    pub divisor: f32,
    pub shift: f32,
    #[serde(default)]
    pub bias: f32,
}

impl AxisSpacing {
    pub const fn new(divisor: f32, shift: f32) -> Self {
        Self {
            divisor,
            shift,
            bias: 0.0,
        }
    }

    pub fn offset(&self, index: u32, count: u32) -> f32 {
        debug_assert!(index < count, "grid index {index} out of range for count {count}");
        let count = count as f32;
        -(count / 2.0) + index as f32 / self.divisor + count * self.shift + self.bias
    }
}

/// Named spacing presets selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SpacingPreset {
    /// Half-unit steps on x/y, tighter z steps, pushed out by 0.3 per count
    Outer,
    /// Like `outer` but with a smaller z push, used inside each cell
    Inner,
    /// Unit lattice centered on the origin
    Lattice,
}

impl SpacingPreset {
    pub fn spacing(self) -> Spacing {
        match self {
            SpacingPreset::Outer => Spacing::OUTER,
            SpacingPreset::Inner => Spacing::INNER,
            SpacingPreset::Lattice => Spacing::LATTICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: AxisSpacing,
    pub y: AxisSpacing,
    pub z: AxisSpacing,
}

impl Spacing {
    pub const OUTER: Spacing = Spacing {
        x: AxisSpacing::new(2.0, 0.3),
        y: AxisSpacing::new(2.0, 0.3),
        z: AxisSpacing::new(1.1, 0.3),
    };

    pub const INNER: Spacing = Spacing {
        x: AxisSpacing::new(2.0, 0.3),
        y: AxisSpacing::new(2.0, 0.3),
        z: AxisSpacing::new(1.1, 0.1),
    };

    pub const LATTICE: Spacing = Spacing {
        x: AxisSpacing { divisor: 1.0, shift: 0.0, bias: 0.5 },
        y: AxisSpacing { divisor: 1.0, shift: 0.0, bias: 0.5 },
        z: AxisSpacing { divisor: 1.0, shift: 0.0, bias: 0.5 },
    };
}

/// Cell coordinates inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridIndex {
    pub i: u32,
    pub j: u32,
    pub k: u32,
}

impl GridIndex {
    pub const fn new(i: u32, j: u32, k: u32) -> Self {
        Self { i, j, k }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub count_x: u32,
    pub count_y: u32,
    pub count_z: u32,
    pub spacing: Spacing,
}

impl GridSpec {
    pub const fn new(count_x: u32, count_y: u32, count_z: u32, spacing: Spacing) -> Self {
        Self {
            count_x,
            count_y,
            count_z,
            spacing,
        }
    }

    /// Same count on every axis
    pub const fn cube(count: u32, spacing: Spacing) -> Self {
        Self::new(count, count, count, spacing)
    }

    pub fn len(&self) -> usize {
        self.count_x as usize * self.count_y as usize * self.count_z as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        index.i < self.count_x && index.j < self.count_y && index.k < self.count_z
    }

    /// Cell offset; depends only on the index and the spacing rule
    pub fn offset(&self, index: GridIndex) -> Vec3 {
        assert!(self.contains(index), "{index:?} outside {self:?}");
        Vec3::new(
            self.spacing.x.offset(index.i, self.count_x),
            self.spacing.y.offset(index.j, self.count_y),
            self.spacing.z.offset(index.k, self.count_z),
        )
    }

    /// Every cell index, x outermost
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        (0..self.count_x).flat_map(move |i| {
            (0..self.count_y).flat_map(move |j| (0..self.count_z).map(move |k| GridIndex::new(i, j, k)))
        })
    }
}

/// Lay out one instance per cell. `factory` runs exactly `spec.len()` times;
/// each result is wrapped in a cell node carrying the cell offset, and the
/// cells are gathered under a single group.
pub fn replicate<F>(name: &str, spec: &GridSpec, mut factory: F) -> SceneNode
where
    F: FnMut(GridIndex) -> SceneNode,
{
    let cells = spec.indices().map(|index| {
        SceneNode::group(format!("{name}[{},{},{}]", index.i, index.j, index.k))
            .with_position(spec.offset(index))
            .with_child(factory(index))
    });

    let grid = SceneNode::group(name).with_children(cells);
    debug_assert_eq!(grid.children.len(), spec.len());
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_outer_offsets_count_three() {
        let spec = GridSpec::cube(3, Spacing::OUTER);
        let xs: Vec<f32> = (0..3).map(|i| spec.offset(GridIndex::new(i, 0, 0)).x).collect();
        assert!(close(xs[0], -0.6));
        assert!(close(xs[1], -0.1));
        assert!(close(xs[2], 0.4));

        let z = spec.offset(GridIndex::new(0, 0, 2)).z;
        assert!(close(z, -1.5 + 2.0 / 1.1 + 0.9));
    }

    #[test]
    fn test_inner_offsets_count_two() {
        let spec = GridSpec::cube(2, Spacing::INNER);
        let near = spec.offset(GridIndex::new(0, 0, 0));
        let far = spec.offset(GridIndex::new(1, 1, 1));
        assert!(close(near.x, -0.4));
        assert!(close(near.z, -0.8));
        assert!(close(far.y, 0.1));
        assert!(close(far.z, -0.8 + 1.0 / 1.1));
    }

    #[test]
    fn test_lattice_is_unit_steps_around_origin() {
        let spec = GridSpec::cube(3, Spacing::LATTICE);
        let offsets: Vec<f32> = (0..3).map(|k| spec.offset(GridIndex::new(0, 0, k)).z).collect();
        assert!(close(offsets[0], -1.0));
        assert!(close(offsets[1], 0.0));
        assert!(close(offsets[2], 1.0));
    }

    #[test]
    fn test_indices_cover_every_cell_once() {
        let spec = GridSpec::new(2, 3, 4, Spacing::INNER);
        let all: std::collections::HashSet<_> = spec.indices().collect();
        assert_eq!(all.len(), 24);
        assert!(all.iter().all(|index| spec.contains(*index)));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let spec = GridSpec::new(3, 0, 3, Spacing::OUTER);
        assert!(spec.is_empty());
        assert_eq!(spec.indices().count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_offset_out_of_range_panics() {
        GridSpec::cube(2, Spacing::INNER).offset(GridIndex::new(2, 0, 0));
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(SpacingPreset::Outer.spacing(), Spacing::OUTER);
        assert_eq!(SpacingPreset::Inner.spacing(), Spacing::INNER);
        assert_eq!(SpacingPreset::Lattice.spacing(), Spacing::LATTICE);
    }
}
