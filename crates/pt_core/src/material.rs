//! Surface materials.
//!
//! A material is plain data: the renderer decides how each kind scatters.

use pt_math::Vec3;
use serde::{Deserialize, Serialize};

/// Linear HDR RGB radiance. Unbounded above; arithmetic is component-wise.
pub type Color = Vec3;

/// How a surface responds to an incoming ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    /// Lambertian reflector, cosine-weighted scattering.
    Diffuse,
    /// Perfect specular reflector.
    Mirror,
    /// Light source. Paths end here and return the emission.
    Emissive,
    /// Glass-like surface with the given index of refraction.
    Dielectric { ior: f32 },
}

/// Shading parameters owned by exactly one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    /// Fraction of light carried on at each bounce, per channel
    pub albedo: Color,
    /// Emitted radiance (zero for anything that is not a light)
    #[serde(default)]
    pub emission: Color,
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            kind: MaterialKind::Diffuse,
            albedo,
            emission: Color::ZERO,
        }
    }

    /// Mirror tinted by `albedo`.
    pub fn mirror(albedo: Color) -> Self {
        Self {
            kind: MaterialKind::Mirror,
            albedo,
            emission: Color::ZERO,
        }
    }

    /// Dielectric with index of refraction `ior` (1.5 = glass, 2.4 = diamond).
    pub fn dielectric(albedo: Color, ior: f32) -> Self {
        Self {
            kind: MaterialKind::Dielectric { ior },
            albedo,
            emission: Color::ZERO,
        }
    }

    /// Light source emitting `emission`.
    pub fn emissive(emission: Color) -> Self {
        Self {
            kind: MaterialKind::Emissive,
            albedo: Color::ZERO,
            emission,
        }
    }

    /// Check if this material terminates paths with its emission.
    pub fn is_emissive(&self) -> bool {
        matches!(self.kind, MaterialKind::Emissive)
    }

    // Presets used by the Cornell box scene

    pub fn white() -> Self {
        Self::diffuse(Color::splat(0.8))
    }

    pub fn gray() -> Self {
        Self::diffuse(Color::splat(0.5))
    }

    pub fn red() -> Self {
        Self::diffuse(Color::new(0.75, 0.1, 0.1))
    }

    pub fn green() -> Self {
        Self::diffuse(Color::new(0.1, 0.65, 0.15))
    }

    pub fn blue() -> Self {
        Self::diffuse(Color::new(0.1, 0.2, 0.8))
    }

    pub fn cyan() -> Self {
        Self::diffuse(Color::new(0.1, 0.7, 0.7))
    }

    pub fn glass() -> Self {
        Self::dielectric(Color::ONE, 1.5)
    }

    pub fn light() -> Self {
        Self::emissive(Color::splat(4.0))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::gray()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_lights_emit() {
        assert!(Material::light().is_emissive());
        assert!(Material::light().emission.length_squared() > 0.0);

        for material in [
            Material::white(),
            Material::red(),
            Material::glass(),
            Material::mirror(Color::ONE),
        ] {
            assert!(!material.is_emissive());
            assert_eq!(material.emission, Color::ZERO);
        }
    }

    #[test]
    fn test_material_json() {
        let json = r#"{ "kind": { "type": "dielectric", "ior": 1.33 }, "albedo": [1.0, 1.0, 1.0] }"#;
        let material: Material = serde_json::from_str(json).unwrap();

        assert_eq!(material.kind, MaterialKind::Dielectric { ior: 1.33 });
        assert_eq!(material.emission, Color::ZERO);
    }
}
