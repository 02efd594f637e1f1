//! Progressive renderer.
//!
//! Owns the scene and a persistent sample buffer. Each `render()` call traces
//! one sample per pixel and folds it into the running averages, so noise
//! drops every frame until the buffer is reset.

use std::time::{Duration, Instant};

use crate::accumulation::SampleBuffer;
use crate::integrator::trace;
use crate::scene::Scene;
use crate::tonemap::{tone_map, DisplayImage};
use pt_core::{RenderSettings, SceneDescription, SceneError, SceneResult, ToneMapSettings};
use pt_math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Timing and progress of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    /// Index of the pass since the last reset (0-based)
    pub frame: u32,
    /// Samples per pixel accumulated after this pass
    pub samples_per_pixel: u32,
    pub elapsed: Duration,
}

/// Progressive path tracer with temporal accumulation.
pub struct Renderer {
    scene: Scene,
    settings: RenderSettings,
    buffer: SampleBuffer,
}

impl Renderer {
    /// Create a renderer for an already built scene.
    ///
    /// Fails if the resolution is zero or the scene camera was built for a
    /// different resolution than `settings`.
    pub fn new(scene: Scene, settings: RenderSettings) -> SceneResult<Self> {
        if settings.width == 0 || settings.height == 0 {
            return Err(SceneError::InvalidResolution {
                width: settings.width,
                height: settings.height,
            });
        }
        check_camera(&scene, &settings)?;

        let buffer = SampleBuffer::new(settings.width, settings.height);
        Ok(Self {
            scene,
            settings,
            buffer,
        })
    }

    /// Build the scene from a description and create a renderer for it.
    pub fn from_description(description: &SceneDescription, settings: RenderSettings) -> SceneResult<Self> {
        let scene = Scene::from_description(description, settings.width, settings.height)?;
        Self::new(scene, settings)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Accumulated HDR samples.
    pub fn samples(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Samples per pixel accumulated so far.
    pub fn samples_per_pixel(&self) -> u32 {
        self.buffer.passes()
    }

    /// True once the sample target (if any) has been reached.
    pub fn is_complete(&self) -> bool {
        self.settings
            .target_samples
            .is_some_and(|target| self.buffer.passes() >= target)
    }

    /// Throw away accumulated samples, for example after a scene change.
    pub fn reset(&mut self) {
        self.buffer.reset();
        log::debug!("Sample buffer reset");
    }

    /// Replace the scene and restart accumulation.
    ///
    /// The new scene must match the current resolution; on error the old
    /// scene and its samples are kept.
    pub fn set_scene(&mut self, scene: Scene) -> SceneResult<()> {
        check_camera(&scene, &self.settings)?;
        self.scene = scene;
        self.reset();
        Ok(())
    }

    /// Trace one sample per pixel and merge it into the buffer.
    ///
    /// Returns `None` without doing any work once the sample target is
    /// reached. Rows run in parallel: each row owns its cells and its own
    /// random generator, seeded from (seed, frame, row).
    pub fn render(&mut self) -> Option<FrameStats> {
        if self.is_complete() {
            return None;
        }

        let start = Instant::now();
        let frame = self.buffer.passes();
        let width = self.buffer.width() as usize;

        let scene = &self.scene;
        let settings = &self.settings;

        self.buffer
            .cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut rng = StdRng::seed_from_u64(row_seed(settings.seed, frame, y as u32));
                for (x, cell) in row.iter_mut().enumerate() {
                    let (x, y) = (x as u32, y as u32);
                    let ray = if settings.jitter {
                        scene.camera.get_ray_jittered(x, y, &mut rng)
                    } else {
                        scene.camera.get_ray(x, y, Vec2::ZERO)
                    };
                    cell.merge(trace(scene, &ray, 0, settings, &mut rng));
                }
            });

        self.buffer.finish_pass();

        let stats = FrameStats {
            frame,
            samples_per_pixel: self.buffer.passes(),
            elapsed: start.elapsed(),
        };
        log::debug!(
            "Rendering time: {:.3}s (frame {}, {} spp)",
            stats.elapsed.as_secs_f64(),
            stats.frame,
            stats.samples_per_pixel
        );
        if self.is_complete() {
            log::info!("Reached target of {} samples per pixel", stats.samples_per_pixel);
        }

        Some(stats)
    }

    /// Tone map the current accumulation into a display image.
    pub fn tone_map(&self, settings: &ToneMapSettings) -> DisplayImage {
        tone_map(&self.buffer, settings)
    }
}

/// The camera must produce exactly one ray per buffer pixel.
fn check_camera(scene: &Scene, settings: &RenderSettings) -> SceneResult<()> {
    let camera = &scene.camera;
    if camera.image_width != settings.width || camera.image_height != settings.height {
        return Err(SceneError::ResolutionMismatch {
            camera_width: camera.image_width,
            camera_height: camera.image_height,
            width: settings.width,
            height: settings.height,
        });
    }
    Ok(())
}

/// Seed for one row of one pass (splitmix64 finalizer over the inputs).
fn row_seed(seed: u64, frame: u32, row: u32) -> u64 {
    let mut z = seed ^ ((frame as u64) << 32 | row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use crate::sphere::Sphere;
    use pt_core::{CameraSettings, Color, Material, ToneMapping};
    use pt_math::Vec3;

    fn settings() -> RenderSettings {
        RenderSettings::default().with_resolution(8, 6).with_max_depth(4)
    }

    #[test]
    fn test_constant_background_converges_immediately() {
        let background = Color::new(0.25, 0.5, 1.0);
        let settings = settings().with_background(background);
        let scene = Scene::new(&CameraSettings::default(), 8, 6).unwrap();
        let mut renderer = Renderer::new(scene, settings).unwrap();

        for _ in 0..5 {
            renderer.render().unwrap();
        }

        assert_eq!(renderer.samples_per_pixel(), 5);
        for cell in renderer.samples().cells() {
            assert_eq!(cell.count, 5);
            assert!((cell.color - background).length() < 1e-6);
        }
    }

    #[test]
    fn test_target_samples_stops_rendering() {
        let scene = Scene::new(&CameraSettings::default(), 8, 6).unwrap();
        let mut renderer = Renderer::new(scene, settings().with_target_samples(3)).unwrap();

        let mut passes = 0;
        while renderer.render().is_some() {
            passes += 1;
            assert!(passes <= 3);
        }
        assert_eq!(passes, 3);
        assert!(renderer.is_complete());

        renderer.reset();
        assert!(!renderer.is_complete());
        assert_eq!(renderer.render().unwrap().frame, 0);
    }

    #[test]
    fn test_same_seed_same_image() {
        let description = SceneDescription::cornell_box();
        let mut a = Renderer::from_description(&description, settings().with_seed(7)).unwrap();
        let mut b = Renderer::from_description(&description, settings().with_seed(7)).unwrap();

        for _ in 0..2 {
            a.render();
            b.render();
        }
        assert_eq!(a.samples().cells(), b.samples().cells());
    }

    #[test]
    fn test_row_seeds_differ() {
        assert_ne!(row_seed(0, 0, 0), row_seed(0, 0, 1));
        assert_ne!(row_seed(0, 0, 1), row_seed(0, 1, 0));
        assert_ne!(row_seed(0, 3, 5), row_seed(1, 3, 5));
    }

    #[test]
    fn test_set_scene_resets() {
        let camera = CameraSettings {
            position: Vec3::new(0.0, 0.0, 5.0),
            ..Default::default()
        };
        let settings = settings().with_jitter(false);
        let mut renderer = Renderer::new(Scene::new(&camera, 8, 6).unwrap(), settings).unwrap();
        renderer.render();

        let mut scene = Scene::new(&camera, 8, 6).unwrap();
        scene.add(Primitive::sphere(Sphere::new(Vec3::ZERO, 1.0), Material::light()));
        renderer.set_scene(scene).unwrap();
        assert_eq!(renderer.samples_per_pixel(), 0);

        renderer.render();
        let image = renderer.tone_map(&ToneMapSettings::new(ToneMapping::Linear, 1.0));
        // Light fills the middle of the frame
        assert_eq!(image.get(4, 3), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let scene = Scene::new(&CameraSettings::default(), 8, 8).unwrap();
        let result = Renderer::new(scene, settings().with_resolution(0, 8));
        assert!(matches!(result, Err(SceneError::InvalidResolution { width: 0, height: 8 })));
    }

    #[test]
    fn test_camera_resolution_must_match_buffer() {
        let scene = Scene::new(&CameraSettings::default(), 4, 4).unwrap();
        let result = Renderer::new(scene, settings().with_resolution(16, 16));
        assert!(matches!(
            result,
            Err(SceneError::ResolutionMismatch {
                camera_width: 4,
                camera_height: 4,
                width: 16,
                height: 16
            })
        ));
    }

    #[test]
    fn test_set_scene_rejects_other_resolution() {
        let camera = CameraSettings::default();
        let mut renderer = Renderer::new(Scene::new(&camera, 8, 6).unwrap(), settings()).unwrap();
        renderer.render();

        let result = renderer.set_scene(Scene::new(&camera, 6, 8).unwrap());
        assert!(matches!(result, Err(SceneError::ResolutionMismatch { .. })));
        // Old scene and samples are kept
        assert_eq!(renderer.samples_per_pixel(), 1);
        assert_eq!(renderer.scene().camera.image_width, 8);
    }
}
