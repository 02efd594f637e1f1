//! Triangle soup consumed by the renderer.
//!
//! Meshes reach the renderer as a flat list of independent world-space
//! triangles. Index buffers and file formats are resolved before this point.

use pt_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// A flat list of triangles, each given by three world-space positions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub triangles: Vec<[Vec3; 3]>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<[Vec3; 3]>) -> Self {
        Self { triangles }
    }

    /// Build a triangle soup from an indexed mesh (every 3 indices form a triangle).
    ///
    /// Triangles referencing vertices out of range are skipped with a warning.
    pub fn from_indexed(positions: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::with_capacity(indices.len() / 3);

        for chunk in indices.chunks_exact(3) {
            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    positions.len()
                );
                continue;
            }

            triangles.push([positions[i0], positions[i1], positions[i2]]);
        }

        Self { triangles }
    }

    /// Scale every vertex about the origin, then translate by `offset`.
    pub fn transformed(mut self, scale: f32, offset: Vec3) -> Self {
        for vertex in self.triangles.iter_mut().flatten() {
            *vertex = *vertex * scale + offset;
        }
        self
    }

    /// Get the number of triangles in the mesh.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut vertices = self.triangles.iter().flatten();
        let first = *vertices.next()?;

        let (min, max) = vertices.fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Aabb::from_points(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_from_indexed() {
        let positions = quad_positions();
        // Two triangles: [0,1,2] and [1,3,2]
        let mesh = TriangleMesh::from_indexed(&positions, &[0, 1, 2, 1, 3, 2]);

        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles[1], [positions[1], positions[3], positions[2]]);
    }

    #[test]
    fn test_from_indexed_skips_bad_indices() {
        let mesh = TriangleMesh::from_indexed(&quad_positions(), &[0, 1, 2, 1, 9, 2, 0]);
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_transformed() {
        let mesh = TriangleMesh::new(vec![[Vec3::ZERO, Vec3::X, Vec3::Y]])
            .transformed(75.0, Vec3::new(2.0, -10.0, 0.0));

        assert_eq!(mesh.triangles[0][0], Vec3::new(2.0, -10.0, 0.0));
        assert_eq!(mesh.triangles[0][1], Vec3::new(77.0, -10.0, 0.0));
        assert_eq!(mesh.triangles[0][2], Vec3::new(2.0, 65.0, 0.0));
    }

    #[test]
    fn test_bounds() {
        assert!(TriangleMesh::default().bounds().is_none());

        let mesh = TriangleMesh::new(vec![[
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ]]);
        let bounds = mesh.bounds().unwrap();

        assert_eq!(bounds.x.min, -1.0);
        assert_eq!(bounds.y.max, 5.0);
        assert_eq!(bounds.z.min, -3.0);
    }
}
