//! Surface scattering for each material kind.

use crate::hittable::HitRecord;
use crate::sampling::{cosine_direction, gen_f32};
use pt_core::{Color, Material, MaterialKind};
use pt_math::{Ray, Vec3};
use rand::RngCore;

/// Continuation of a path after a surface interaction.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel weight applied to the radiance carried back along `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Light interaction of a surface material.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the path stops here (light sources).
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Radiance emitted by the surface.
    fn emitted(&self) -> Color;
}

impl Scatter for Material {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let direction = match self.kind {
            MaterialKind::Emissive => return None,
            // Cosine weighting cancels the BRDF cosine term, leaving just the albedo
            MaterialKind::Diffuse => cosine_direction(rec.normal, rng),
            MaterialKind::Mirror => reflect(ray_in.direction(), rec.normal),
            MaterialKind::Dielectric { ior } => dielectric_direction(ray_in.direction(), rec, ior, rng),
        };

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }

    fn emitted(&self) -> Color {
        self.emission
    }
}

/// Pick reflection or refraction with Fresnel (Schlick) probability.
fn dielectric_direction(unit_direction: Vec3, rec: &HitRecord, ior: f32, rng: &mut dyn RngCore) -> Vec3 {
    let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    // Check for total internal reflection
    let cannot_refract = refraction_ratio * sin_theta > 1.0;

    if cannot_refract || reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, refraction_ratio)
    }
}

/// Schlick's approximation for reflectance.
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface (Snell's law).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
