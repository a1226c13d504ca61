use glam::{Affine3A, Vec3};

const EPSILON: f32 = 1e-8;
const MIN_T: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Ray hit in the space the ray was expressed in
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub t: f32,
    pub normal: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express the ray in another space. The direction is not renormalized,
    /// so `t` values stay comparable across spaces.
    pub fn transformed(&self, matrix: &Affine3A) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Slab test against an axis-aligned box; returns the entry distance, or the
/// exit distance when the origin is inside
pub fn intersect_aabb(ray_origin: Vec3, ray_dir: Vec3, box_min: Vec3, box_max: Vec3) -> Option<f32> {
    // Clamp near-zero components so the reciprocal stays finite
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.x) } else { 1.0 / ray_dir.x },
        if ray_dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.y) } else { 1.0 / ray_dir.y },
        if ray_dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.z) } else { 1.0 / ray_dir.z },
    );

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    if t_near < 0.0 {
        (t_far > MIN_T).then_some(t_far)
    } else {
        Some(t_near)
    }
}

/// Box centered on the origin with the given full dimensions
pub fn intersect_box(ray: &Ray, size: Vec3) -> Option<Hit> {
    let half = size * 0.5;
    let t = intersect_aabb(ray.origin, ray.direction, -half, half)?;

    // The face hit is the axis where the point sits closest to the boundary
    let p = ray.at(t) / half;
    let a = p.abs();
    let normal = if a.x >= a.y && a.x >= a.z {
        Vec3::new(p.x.signum(), 0.0, 0.0)
    } else if a.y >= a.z {
        Vec3::new(0.0, p.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, p.z.signum())
    };

    Some(Hit { t, normal })
}

/// Sphere centered on the origin
pub fn intersect_sphere(ray: &Ray, radius: f32) -> Option<Hit> {
    let a = ray.direction.length_squared();
    if a < EPSILON {
        return None;
    }
    let half_b = ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let near = (-half_b - sqrt_d) / a;
    let far = (-half_b + sqrt_d) / a;
    let t = if near > MIN_T {
        near
    } else if far > MIN_T {
        far
    } else {
        return None;
    };

    Some(Hit {
        t,
        normal: ray.at(t) / radius,
    })
}

/// Distance to the nearest point of a bounding sphere, ignoring hits behind
/// the origin
pub fn hits_bounding_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let local = Ray::new(ray.origin - center, ray.direction);
    intersect_sphere(&local, radius).map(|hit| hit.t)
}
