//! Core types for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene description**: `SceneDescription`, `ShapeDescription`, `CameraSettings`
//! - **Materials**: `Material`, `MaterialKind` and the Cornell box presets
//! - **Mesh source**: `TriangleMesh` and OBJ loading
//! - **Configuration**: `RenderSettings`, `ToneMapSettings`
//!
//! # Example
//!
//! ```ignore
//! use pt_core::SceneDescription;
//!
//! let scene = SceneDescription::load_json("scene.json")?;
//! println!("Loaded {} objects", scene.objects.len());
//! ```

pub mod error;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use material::{Color, Material, MaterialKind};
pub use mesh::TriangleMesh;
pub use obj::load_obj_triangles;
pub use scene::{CameraSettings, MeshSource, ObjectDescription, SceneDescription, ShapeDescription};
pub use settings::{RenderSettings, ToneMapSettings, ToneMapping};
