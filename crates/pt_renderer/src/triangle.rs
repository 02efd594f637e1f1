//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::ShapeHit;
use pt_math::{Interval, Ray, Vec3};

/// Determinant threshold below which the ray counts as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Twice-area threshold below which a triangle is treated as degenerate.
const DEGENERATE_AREA: f32 = 1e-12;

/// A single triangle. The normal follows the winding v0 -> v1 -> v2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v0: Vec3,
    edge1: Vec3,
    edge2: Vec3,
    /// Unit face normal, zero for degenerate triangles
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let cross = edge1.cross(edge2);
        let normal = if cross.length() > DEGENERATE_AREA {
            cross.normalize()
        } else {
            Vec3::ZERO
        };

        Self {
            v0,
            edge1,
            edge2,
            normal,
        }
    }

    pub fn from_vertices(vertices: [Vec3; 3]) -> Self {
        Self::new(vertices[0], vertices[1], vertices[2])
    }

    /// Zero-area triangles (collinear or coincident vertices) never hit.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v0 + self.edge1, self.v0 + self.edge2]
    }

    /// Möller-Trumbore ray-triangle intersection.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        if self.is_degenerate() {
            return None;
        }

        let h = ray.direction().cross(self.edge2);
        let a = self.edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(ShapeHit {
            t,
            outward_normal: self.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1, counter-clockwise seen from +Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = xy_triangle().hit(&ray, Interval::FORWARD).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.outward_normal, Vec3::Z);
    }

    #[test]
    fn test_normal_follows_winding() {
        let [a, b, c] = xy_triangle().vertices();
        let flipped = Triangle::new(a, c, b);
        assert_eq!(flipped.normal(), Vec3::NEG_Z);
    }

    #[test]
    fn test_triangle_miss() {
        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(xy_triangle().hit(&ray, Interval::FORWARD).is_none());

        // Outside the edges
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z);
        assert!(xy_triangle().hit(&ray, Interval::FORWARD).is_none());

        // Parallel to the plane
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(xy_triangle().hit(&ray, Interval::FORWARD).is_none());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let collinear = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        let collapsed = Triangle::new(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);

        for tri in [collinear, collapsed] {
            assert!(tri.is_degenerate());
            assert!(tri.normal().is_finite());
            assert!(tri.hit(&ray, Interval::FORWARD).is_none());
        }
    }
}
