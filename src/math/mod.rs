mod color;
mod ray;
mod transform;

pub use color::Color;
pub use ray::{hits_bounding_sphere, intersect_aabb, intersect_box, intersect_sphere, Hit, Ray};
pub use transform::{max_scale, Transform};
