//! Renderable scene: primitives plus camera.

use crate::camera::Camera;
use crate::hittable::HitRecord;
use crate::primitive::Primitive;
use pt_core::{CameraSettings, SceneDescription, SceneError, SceneResult};
use pt_math::{Interval, Ray};

/// Immutable collection of primitives and the camera that views them.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    pub camera: Camera,
}

impl Scene {
    /// Create an empty scene rendered at `width` x `height`.
    pub fn new(camera_settings: &CameraSettings, width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidResolution { width, height });
        }

        Ok(Self {
            primitives: Vec::new(),
            camera: Camera::new(camera_settings, width, height),
        })
    }

    /// Build every object of a description, loading meshes as needed.
    pub fn from_description(description: &SceneDescription, width: u32, height: u32) -> SceneResult<Self> {
        let mut scene = Self::new(&description.camera, width, height)?;
        for object in &description.objects {
            scene.add(Primitive::from_description(object)?);
        }

        log::info!(
            "Scene built: {} primitives, {} triangles",
            scene.len(),
            scene.triangle_count()
        );
        Ok(scene)
    }

    /// Add a primitive.
    pub fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Total number of triangles over all primitives.
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.shape.triangle_count()).sum()
    }

    /// Nearest hit across all primitives.
    ///
    /// Linear scan; each hit narrows the interval, so on equal distances the
    /// earlier primitive wins.
    pub fn find_nearest(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for primitive in &self.primitives {
            let ray_t = Interval::FORWARD.with_max(closest.map_or(f32::INFINITY, |rec| rec.t));
            if let Some(rec) = primitive.intersect(ray, ray_t) {
                closest = Some(rec);
            }
        }

        closest
    }
}
