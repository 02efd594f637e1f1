//! Sphere primitive.

use crate::hittable::ShapeHit;
use pt_math::{Interval, Ray, Vec3};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero (never hit).
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Nearest intersection inside `ray_t`.
    ///
    /// Solves |o + t d - c|^2 = r^2 for a unit-length `d`. When the near root
    /// lies before `ray_t.min` (ray starts on or inside the sphere) the far
    /// root is used instead.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(ShapeHit {
            t: root,
            outward_normal: (ray.at(root) - self.center) / self.radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_distance() {
        for radius in [0.5, 1.0, 3.0] {
            let sphere = Sphere::new(Vec3::ZERO, radius);
            let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);

            let hit = sphere.hit(&ray, Interval::FORWARD).unwrap();
            assert!((hit.t - (10.0 - radius)).abs() < 1e-4, "radius {}: t = {}", radius, hit.t);
            assert!((hit.outward_normal - Vec3::NEG_Z).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.hit(&ray, Interval::FORWARD).is_none());

        // Sphere entirely behind the ray
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.hit(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_sphere_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.hit(&ray, Interval::FORWARD).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_surface_origin_does_not_self_hit() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        // Leaving the surface outward
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(sphere.hit(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_degenerate_sphere_never_hits() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);

        assert!(Sphere::new(Vec3::ZERO, 0.0).hit(&ray, Interval::FORWARD).is_none());
        assert!(Sphere::new(Vec3::ZERO, -1.0).hit(&ray, Interval::FORWARD).is_none());
    }
}
