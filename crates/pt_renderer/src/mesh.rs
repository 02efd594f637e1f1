//! Triangle mesh primitive.
//!
//! A mesh is a list of independent triangles tested by linear scan. An
//! optional bounding box lets rays that miss the whole mesh skip the scan.

use crate::hittable::ShapeHit;
use crate::triangle::Triangle;
use pt_core::{SceneError, SceneResult, TriangleMesh};
use pt_math::{Aabb, Interval, Ray};

/// A world-space triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshObject {
    triangles: Vec<Triangle>,
    bounds: Option<Aabb>,
}

impl MeshObject {
    /// Build a mesh from world-space triangles.
    ///
    /// An empty triangle list is a configuration error. Degenerate triangles
    /// are dropped here since they can never be hit.
    pub fn new(name: &str, mesh: &TriangleMesh, use_bounds: bool) -> SceneResult<Self> {
        if mesh.is_empty() {
            return Err(SceneError::EmptyMesh(name.to_string()));
        }

        let triangles: Vec<Triangle> = mesh
            .triangles
            .iter()
            .map(|&vertices| Triangle::from_vertices(vertices))
            .filter(|tri| !tri.is_degenerate())
            .collect();

        let skipped = mesh.len() - triangles.len();
        if skipped > 0 {
            log::debug!("Mesh '{}': skipped {} degenerate triangle(s)", name, skipped);
        }

        let bounds = if use_bounds { mesh.bounds() } else { None };

        Ok(Self { triangles, bounds })
    }

    /// Get the number of (non-degenerate) triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Nearest hit over all triangles.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        if let Some(bounds) = &self.bounds {
            if !bounds.hit(ray, ray_t) {
                return None;
            }
        }

        let mut closest: Option<ShapeHit> = None;
        for tri in &self.triangles {
            let interval = ray_t.with_max(closest.map_or(ray_t.max, |h| h.t));
            if let Some(hit) = tri.hit(ray, interval) {
                closest = Some(hit);
            }
        }
        closest
    }
}
