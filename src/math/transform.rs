use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Parent-relative placement of a scene node or figure part
///
/// Rotation holds per-axis angles in radians applied as intrinsic X, then Y,
/// then Z. The local matrix is `translate * rotate * scale`, so position is
/// applied last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_scale_xyz(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// World matrix of a child placed with this transform under `parent`
    pub fn world_matrix(&self, parent: &Affine3A) -> Affine3A {
        *parent * self.local_matrix()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Largest axis scale of an affine transform, used to scale bounding radii
pub fn max_scale(matrix: &Affine3A) -> f32 {
    matrix
        .matrix3
        .x_axis
        .length()
        .max(matrix.matrix3.y_axis.length())
        .max(matrix.matrix3.z_axis.length())
}
