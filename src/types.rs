use serde::Serialize;

use crate::math::Color;

/// Primitive shape descriptor handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Box centered on its origin with full extents along each axis
    Box { width: f32, height: f32, depth: f32 },
    /// Sphere centered on its origin; segment counts are tessellation hints
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    pub const fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Box { width, height, depth }
    }

    /// Sphere with the 32x16 tessellation every figure part uses
    pub const fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 16,
        }
    }

    /// Radius of a sphere around the local origin enclosing the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Geometry::Box { width, height, depth } => {
                0.5 * (width * width + height * height + depth * depth).sqrt()
            }
            Geometry::Sphere { radius, .. } => radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: Color,
}

impl Material {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Light source; a point light takes its position from the owning node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Ambient { color: Color, intensity: f32 },
    Point { color: Color, intensity: f32 },
}

impl Light {
    pub const fn ambient() -> Self {
        Light::Ambient {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }

    pub const fn point() -> Self {
        Light::Point {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

/// RGBA8 pixel as uploaded to the surface texture
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 255 };

    pub fn from_color(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounding_radius_is_half_diagonal() {
        let geometry = Geometry::cuboid(2.0, 2.0, 1.0);
        assert!((geometry.bounding_radius() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_defaults() {
        let geometry = Geometry::sphere(0.8);
        assert_eq!(
            geometry,
            Geometry::Sphere {
                radius: 0.8,
                width_segments: 32,
                height_segments: 16
            }
        );
        assert_eq!(geometry.bounding_radius(), 0.8);
    }

    #[test]
    fn test_rgba8_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
        let pixels = [Rgba8::BLACK, Rgba8::from_color(Color::WHITE)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_geometry_serializes_tagged() {
        let json = serde_json::to_value(Geometry::cuboid(1.0, 3.0, 1.0)).unwrap();
        assert_eq!(json["type"], "box");
        assert_eq!(json["height"], 3.0);
    }
}
