//! Closed set of intersectable shapes.
//!
//! Using an enum keeps dispatch static in the innermost loop: the set of
//! shape kinds is fixed, so there is no need for trait objects.

use crate::aabox::AxisBox;
use crate::hittable::{HitRecord, ShapeHit};
use crate::mesh::MeshObject;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use pt_core::{Material, ObjectDescription, SceneResult, ShapeDescription};
use pt_math::{Interval, Ray};

/// Shape of a primitive.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Box(AxisBox),
    Triangle(Triangle),
    Mesh(MeshObject),
}

impl Shape {
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray, ray_t),
            Shape::Box(aabox) => aabox.hit(ray, ray_t),
            Shape::Triangle(tri) => tri.hit(ray, ray_t),
            Shape::Mesh(mesh) => mesh.hit(ray, ray_t),
        }
    }

    /// Number of triangles this shape contributes (zero for analytic shapes).
    pub fn triangle_count(&self) -> usize {
        match self {
            Shape::Triangle(_) => 1,
            Shape::Mesh(mesh) => mesh.triangle_count(),
            Shape::Sphere(_) | Shape::Box(_) => 0,
        }
    }
}

/// A shape together with the one material it owns.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

impl Primitive {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(sphere: Sphere, material: Material) -> Self {
        Self::new(Shape::Sphere(sphere), material)
    }

    pub fn aabox(aabox: AxisBox, material: Material) -> Self {
        Self::new(Shape::Box(aabox), material)
    }

    pub fn triangle(tri: Triangle, material: Material) -> Self {
        Self::new(Shape::Triangle(tri), material)
    }

    pub fn mesh(mesh: MeshObject, material: Material) -> Self {
        Self::new(Shape::Mesh(mesh), material)
    }

    /// Build a primitive from its description, loading mesh data if needed.
    pub fn from_description(object: &ObjectDescription) -> SceneResult<Self> {
        let shape = match &object.shape {
            ShapeDescription::Sphere { center, radius } => Shape::Sphere(Sphere::new(*center, *radius)),
            ShapeDescription::Box { min, max } => Shape::Box(AxisBox::new(*min, *max)),
            ShapeDescription::Triangle { vertices } => Shape::Triangle(Triangle::from_vertices(*vertices)),
            ShapeDescription::Mesh { mesh, use_bounds } => {
                let triangles = mesh.load()?;
                Shape::Mesh(MeshObject::new(&object.name, &triangles, *use_bounds)?)
            }
        };
        Ok(Self::new(shape, object.material))
    }

    /// Intersect the ray with this primitive within `ray_t`.
    #[inline]
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.shape
            .hit(ray, ray_t)
            .map(|hit| HitRecord::new(ray, hit, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_core::{MeshSource, TriangleMesh};
    use pt_math::Vec3;

    #[test]
    fn test_intersect_carries_material() {
        let prim = Primitive::sphere(Sphere::new(Vec3::ZERO, 1.0), Material::red());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);

        let rec = prim.intersect(&ray, Interval::FORWARD).unwrap();
        assert_eq!(*rec.material, Material::red());
        assert!((rec.p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_from_description() {
        let object = ObjectDescription {
            name: "inline".into(),
            shape: ShapeDescription::Mesh {
                mesh: MeshSource::Inline {
                    triangles: vec![[Vec3::ZERO, Vec3::X, Vec3::Y]],
                },
                use_bounds: true,
            },
            material: Material::cyan(),
        };

        let prim = Primitive::from_description(&object).unwrap();
        assert_eq!(prim.shape.triangle_count(), 1);
    }

    #[test]
    fn test_from_description_empty_mesh() {
        let object = ObjectDescription {
            name: "empty".into(),
            shape: ShapeDescription::Mesh {
                mesh: MeshSource::Inline { triangles: TriangleMesh::default().triangles },
                use_bounds: false,
            },
            material: Material::cyan(),
        };

        assert!(Primitive::from_description(&object).is_err());
    }
}
