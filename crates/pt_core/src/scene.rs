//! Scene description.
//!
//! A renderer-agnostic list of shapes with materials plus a camera. It can be
//! built in code, read from JSON, or taken from the Cornell box preset.

use std::fs;
use std::path::{Path, PathBuf};

use pt_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::material::Material;
use crate::mesh::TriangleMesh;
use crate::obj::load_obj_triangles;

/// Camera placement and projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Clip planes, kept for the display side; the tracer ignores them
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 15.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

/// Where the triangles of a mesh come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MeshSource {
    /// First model of an OBJ file, mapped with `position * scale + offset`
    Obj {
        path: PathBuf,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(default)]
        offset: Vec3,
    },
    /// Triangles given directly in world space
    Inline { triangles: Vec<[Vec3; 3]> },
}

impl MeshSource {
    /// Resolve the source into world-space triangles.
    pub fn load(&self) -> SceneResult<TriangleMesh> {
        match self {
            MeshSource::Obj { path, scale, offset } => load_obj_triangles(path, *scale, *offset),
            MeshSource::Inline { triangles } => Ok(TriangleMesh::new(triangles.clone())),
        }
    }
}

/// Shape parameters of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box from two opposite corners
    Box { min: Vec3, max: Vec3 },
    Triangle { vertices: [Vec3; 3] },
    Mesh {
        mesh: MeshSource,
        /// Test the mesh bounding box before its triangles
        #[serde(default)]
        use_bounds: bool,
    },
}

/// One shape with its material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    #[serde(default)]
    pub name: String,
    pub shape: ShapeDescription,
    pub material: Material,
}

/// Shapes plus camera, as handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: CameraSettings) -> Self {
        Self {
            camera,
            objects: Vec::new(),
        }
    }

    /// Add a named object.
    pub fn with_object(mut self, name: impl Into<String>, shape: ShapeDescription, material: Material) -> Self {
        self.objects.push(ObjectDescription {
            name: name.into(),
            shape,
            material,
        });
        self
    }

    pub fn with_sphere(self, name: &str, center: Vec3, radius: f32, material: Material) -> Self {
        self.with_object(name, ShapeDescription::Sphere { center, radius }, material)
    }

    pub fn with_box(self, name: &str, min: Vec3, max: Vec3, material: Material) -> Self {
        self.with_object(name, ShapeDescription::Box { min, max }, material)
    }

    pub fn with_mesh(self, name: &str, mesh: MeshSource, use_bounds: bool, material: Material) -> Self {
        self.with_object(name, ShapeDescription::Mesh { mesh, use_bounds }, material)
    }

    /// Closed room with colored side walls, a small spherical light and a
    /// large blue sphere wedged into the top back corner.
    pub fn cornell_box() -> Self {
        Self::new(CameraSettings::default())
            .with_box("floor", Vec3::new(-10.0, -11.0, -10.0), Vec3::new(10.0, -10.0, 20.0), Material::white())
            .with_box("left_wall", Vec3::new(-11.0, -10.0, -10.0), Vec3::new(-10.0, 10.0, 20.0), Material::red())
            .with_box("right_wall", Vec3::new(10.0, -10.0, -10.0), Vec3::new(11.0, 10.0, 20.0), Material::green())
            .with_box("back_wall", Vec3::new(-10.0, -10.0, -11.0), Vec3::new(10.0, 10.0, -10.0), Material::gray())
            .with_box("front_wall", Vec3::new(-10.0, -10.0, 20.0), Vec3::new(10.0, 10.0, 21.0), Material::gray())
            .with_box("ceiling", Vec3::new(-10.0, 10.0, -10.0), Vec3::new(10.0, 11.0, 20.0), Material::gray())
            .with_sphere("light", Vec3::new(-5.0, -7.0, 3.0), 1.0, Material::light())
            .with_sphere("corner_sphere", Vec3::new(10.0, 10.0, -10.0), 10.0, Material::blue())
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    ///
    /// Relative OBJ paths are resolved against the directory of the file.
    pub fn load_json(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let mut scene = Self::from_json_str(&fs::read_to_string(path)?)?;

        if let Some(base) = path.parent() {
            scene.resolve_paths(base);
        }

        log::info!("Loaded scene {} ({} objects)", path.display(), scene.objects.len());
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for object in &mut self.objects {
            if let ShapeDescription::Mesh {
                mesh: MeshSource::Obj { path, .. },
                ..
            } = &mut object.shape
            {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}
