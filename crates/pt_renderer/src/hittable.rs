//! Intersection results.

use pt_core::Material;
use pt_math::{Ray, Vec3};

/// Geometric part of a hit, reported by the individual shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Distance along the (unit) ray direction
    pub t: f32,
    /// Unit surface normal pointing out of the shape (or along the winding
    /// normal for triangles)
    pub outward_normal: Vec3,
}

/// Record of the nearest ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from a shape hit.
    ///
    /// The normal is stored pointing against the ray direction, so we
    /// need to track whether we hit the front or back face.
    pub fn new(ray: &Ray, hit: ShapeHit, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(hit.outward_normal) < 0.0;
        let normal = if front_face {
            hit.outward_normal
        } else {
            -hit.outward_normal
        };

        Self {
            t: hit.t,
            p: ray.at(hit.t),
            normal,
            front_face,
            material,
        }
    }
}
