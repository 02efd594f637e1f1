//! Camera for primary ray generation.

use crate::sampling::sample_square;
use pt_core::CameraSettings;
use pt_math::{Ray, Vec2, Vec3};
use rand::RngCore;

/// Pinhole camera mapping pixel coordinates to primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,
    vfov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    // Cached viewport geometry
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    forward: Vec3,
}

impl Camera {
    /// Create a camera for a `width` x `height` image.
    ///
    /// The aspect ratio follows the image; `near`/`far` are carried along
    /// for display code but do not clip traced rays.
    pub fn new(settings: &CameraSettings, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let aspect_ratio = width as f32 / height as f32;

        // Calculate camera basis vectors
        let w = (settings.position - settings.look_at)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        let up = if settings.up.cross(w).length_squared() > 1e-12 {
            settings.up
        } else if w.y.abs() < 0.999 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let u = up.cross(w).normalize();
        let v = w.cross(u);

        // Viewport on the plane one unit in front of the camera
        let h = (settings.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * aspect_ratio;

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / width as f32;
        let pixel_delta_v = viewport_v / height as f32;

        // Row 0 is the top of the image
        let viewport_upper_left = settings.position - w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width: width,
            image_height: height,
            position: settings.position,
            vfov: settings.vfov,
            aspect_ratio,
            near: settings.near,
            far: settings.far,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            forward: -w,
        }
    }

    /// Ray through pixel (i, j), displaced by `offset` pixels from its center.
    ///
    /// Deterministic: the same pixel and offset always give the same ray.
    pub fn get_ray(&self, i: u32, j: u32, offset: Vec2) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v;

        Ray::new(self.position, pixel_sample - self.position)
    }

    /// Ray through a random point of pixel (i, j), for anti-aliasing.
    pub fn get_ray_jittered(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        self.get_ray(i, j, sample_square(rng))
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Vertical field of view in degrees.
    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z(width: u32, height: u32) -> Camera {
        let settings = CameraSettings {
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            up: Vec3::Y,
            vfov: 90.0,
            ..Default::default()
        };
        Camera::new(&settings, width, height)
    }

    #[test]
    fn test_center_ray_points_forward() {
        // Odd resolution so a pixel center sits on the optical axis
        let camera = looking_down_z(101, 101);
        let ray = camera.get_ray(50, 50, Vec2::ZERO);

        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-4);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_image_orientation() {
        let camera = looking_down_z(100, 50);

        // Top-left pixel looks up and to the left
        let ray = camera.get_ray(0, 0, Vec2::ZERO);
        assert!(ray.direction().x < 0.0);
        assert!(ray.direction().y > 0.0);

        // Bottom-right pixel looks down and to the right
        let ray = camera.get_ray(99, 49, Vec2::ZERO);
        assert!(ray.direction().x > 0.0);
        assert!(ray.direction().y < 0.0);

        assert_eq!(camera.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_get_ray_is_deterministic() {
        let camera = looking_down_z(64, 64);
        let offset = Vec2::new(0.25, -0.1);
        assert_eq!(camera.get_ray(3, 7, offset), camera.get_ray(3, 7, offset));
    }

    #[test]
    fn test_jitter_stays_in_pixel() {
        let camera = looking_down_z(64, 64);
        let mut rng = StdRng::seed_from_u64(42);

        // Compare where the rays cross the z = -1 viewport plane
        let on_plane = |ray: Ray| ray.direction() / -ray.direction().z;
        let left = on_plane(camera.get_ray(10, 10, Vec2::new(-0.5, 0.0)));
        let right = on_plane(camera.get_ray(10, 10, Vec2::new(0.5, 0.0)));
        for _ in 0..100 {
            let p = on_plane(camera.get_ray_jittered(10, 10, &mut rng));
            assert!(p.x >= left.x - 1e-5 && p.x <= right.x + 1e-5);
        }
    }

    #[test]
    fn test_degenerate_up_vector() {
        let settings = CameraSettings {
            position: Vec3::new(0.0, 10.0, 0.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            ..Default::default()
        };
        let camera = Camera::new(&settings, 32, 32);
        let ray = camera.get_ray(16, 16, Vec2::ZERO);

        assert!(ray.direction().is_finite());
        assert!(ray.direction().y < -0.9);
    }
}
