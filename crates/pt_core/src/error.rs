//! Errors reported while building a scene.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
///
/// These are configuration errors: they are reported once, at scene
/// construction time, and never from inside a render pass.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Mesh '{0}' contains no triangles")]
    EmptyMesh(String),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Camera built for {camera_width}x{camera_height} but the image is {width}x{height}")]
    ResolutionMismatch {
        camera_width: u32,
        camera_height: u32,
        width: u32,
        height: u32,
    },

    #[error("No models found in OBJ file {}", .0.display())]
    NoModels(PathBuf),

    #[error("Failed to load OBJ file {}: {source}", .path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
