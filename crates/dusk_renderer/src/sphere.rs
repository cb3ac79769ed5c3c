//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use dusk_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius is allowed: the surface is the same but the
/// outward normal points inwards, which turns a sphere nested inside a
/// dielectric into a hollow shell.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. The material may be shared with other spheres.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        debug_assert!(radius != 0.0, "sphere radius must be nonzero");
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first, then the far one (a ray starting inside only
        // meets the far root)
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;

        Some(HitRecord::new(ray, root, p, outward_normal, &self.material))
    }
}
