//! Wavefront OBJ mesh source.
//!
//! Loading is kept out of the renderer: this module turns an OBJ file into
//! the world-space `TriangleMesh` the renderer consumes.

use std::path::Path;

use pt_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::mesh::TriangleMesh;

/// Load the first model of an OBJ file as world-space triangles.
///
/// Every vertex is mapped to `position * scale + offset`.
pub fn load_obj_triangles(path: impl AsRef<Path>, scale: f32, offset: Vec3) -> SceneResult<TriangleMesh> {
    let path = path.as_ref();

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| SceneError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    // Only the first shape is converted
    let model = models
        .first()
        .ok_or_else(|| SceneError::NoModels(path.to_path_buf()))?;
    if models.len() > 1 {
        log::debug!("{}: ignoring {} extra model(s)", path.display(), models.len() - 1);
    }

    let positions: Vec<Vec3> = model
        .mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    let mesh = TriangleMesh::from_indexed(&positions, &model.mesh.indices).transformed(scale, offset);

    log::info!(
        "Loaded '{}' from {}: {} vertices, {} triangles",
        model.name,
        path.display(),
        positions.len(),
        mesh.len()
    );

    Ok(mesh)
}
