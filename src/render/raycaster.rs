use glam::Vec3;

use crate::core::display_context::DisplayContext;
use crate::math::{hits_bounding_sphere, intersect_box, intersect_sphere, Color, Hit, Ray};
use crate::scene::{DrawItem, DrawList, LightInstance, SceneNode};
use crate::types::{Geometry, Rgba8};

use super::{Camera, RenderOutput, SceneRenderer};

const AMBIENT_WEIGHT: f32 = 0.45;
const DIFFUSE_WEIGHT: f32 = 0.75;

/// CPU ray caster: one primary ray per pixel, nearest hit wins, shaded with
/// ambient plus Lambert point lighting. An unlit scene renders black.
#[derive(Debug, Clone)]
pub struct RayCaster {
    pub camera: Camera,
    pub background: Color,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::new(Camera::new())
    }
}

struct SurfaceHit {
    t: f32,
    point: Vec3,
    normal: Vec3,
    color: Color,
}

impl RayCaster {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            background: Color::BLACK,
        }
    }

    pub fn render_list(&self, list: &DrawList, viewport: &DisplayContext) -> RenderOutput {
        let background = Rgba8::from_color(self.background);
        let mut pixels = vec![background; viewport.pixel_count()];

        for y in 0..viewport.height {
            for x in 0..viewport.width {
                let ray = self.camera.primary_ray(x, y, viewport);
                if let Some(hit) = nearest_hit(list, &ray) {
                    let index = (y * viewport.width + x) as usize;
                    pixels[index] = Rgba8::from_color(shade(&hit, &list.lights));
                }
            }
        }

        RenderOutput {
            viewport: *viewport,
            pixels,
        }
    }
}

impl SceneRenderer for RayCaster {
    fn render(&mut self, scene: &SceneNode, viewport: &DisplayContext) -> RenderOutput {
        self.render_list(&DrawList::from_scene(scene), viewport)
    }
}

fn nearest_hit(list: &DrawList, ray: &Ray) -> Option<SurfaceHit> {
    let mut best: Option<SurfaceHit> = None;

    for batch in &list.batches {
        let inside = (ray.origin - batch.center).length() <= batch.radius;
        if !inside {
            match hits_bounding_sphere(ray, batch.center, batch.radius) {
                Some(t) if best.as_ref().map_or(true, |b| t < b.t) => {}
                _ => continue,
            }
        }

        for item in &batch.items {
            let Some(hit) = intersect_item(item, ray) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| hit.t < b.t) {
                best = Some(SurfaceHit {
                    t: hit.t,
                    point: ray.at(hit.t),
                    normal: item.normal_matrix.mul_vec3(hit.normal).normalize(),
                    color: item.color,
                });
            }
        }
    }

    best
}

fn intersect_item(item: &DrawItem, ray: &Ray) -> Option<Hit> {
    let local = ray.transformed(&item.world_to_local);
    match item.geometry {
        Geometry::Box { width, height, depth } => intersect_box(&local, Vec3::new(width, height, depth)),
        Geometry::Sphere { radius, .. } => intersect_sphere(&local, radius),
    }
}

fn shade(hit: &SurfaceHit, lights: &[LightInstance]) -> Color {
    let mut light = Vec3::ZERO;
    for instance in lights {
        match *instance {
            LightInstance::Ambient { color, intensity } => {
                light += Vec3::from_array(color.to_array()) * intensity * AMBIENT_WEIGHT;
            }
            LightInstance::Point {
                position,
                color,
                intensity,
            } => {
                let to_light = (position - hit.point).normalize_or_zero();
                let lambert = hit.normal.dot(to_light).max(0.0);
                light += Vec3::from_array(color.to_array()) * intensity * lambert * DIFFUSE_WEIGHT;
            }
        }
    }

    let lit = (Vec3::from_array(hit.color.to_array()) * light).clamp(Vec3::ZERO, Vec3::ONE);
    Color::rgb(lit.x, lit.y, lit.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::build_figure;
    use crate::math::Transform;
    use crate::types::Light;

    fn single_dog(with_lights: bool) -> SceneNode {
        let mut scene = SceneNode::group("scene");
        if with_lights {
            scene.push(SceneNode::light("ambient", Light::ambient()));
            scene.push(SceneNode::light("point", Light::point()).with_position(Vec3::new(10.0, 10.0, 10.0)));
        }
        scene.with_child(
            SceneNode::figure("dog", build_figure(Color::SADDLE_BROWN))
                .with_transform(Transform::default().with_scale(0.5)),
        )
    }

    #[test]
    fn test_lit_scene_colors_center_pixel() {
        let mut caster = RayCaster::default();
        let viewport = DisplayContext::new(33, 33);
        let frame = caster.render(&single_dog(true), &viewport);

        assert_eq!(frame.pixels.len(), viewport.pixel_count());
        assert_ne!(frame.pixel(16, 16), Rgba8::BLACK);
    }

    #[test]
    fn test_unlit_scene_is_black() {
        let mut caster = RayCaster::default();
        let frame = caster.render(&single_dog(false), &DisplayContext::new(16, 16));
        assert!(frame.pixels.iter().all(|pixel| *pixel == Rgba8::BLACK));
    }

    #[test]
    fn test_empty_scene_shows_background() {
        let mut caster = RayCaster {
            background: Color::WHITE,
            ..Default::default()
        };
        let frame = caster.render(&SceneNode::group("scene"), &DisplayContext::new(4, 4));
        assert!(frame.pixels.iter().all(|pixel| *pixel == Rgba8::from_color(Color::WHITE)));
        assert_eq!(frame.as_bytes().len(), 4 * 4 * 4);
    }

    #[test]
    fn test_ambient_only_gives_flat_albedo() {
        let hit = SurfaceHit {
            t: 1.0,
            point: Vec3::ZERO,
            normal: Vec3::Y,
            color: Color::WHITE,
        };
        let lights = [LightInstance::Ambient {
            color: Color::WHITE,
            intensity: 1.0,
        }];
        let shaded = shade(&hit, &lights);
        assert!((shaded.r - AMBIENT_WEIGHT).abs() < 1e-6);
        assert_eq!(shaded.r, shaded.g);
    }
}
