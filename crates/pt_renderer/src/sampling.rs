//! Random sampling helpers.
//!
//! Every function takes the caller's generator explicitly; there is no
//! shared random state, so callers on different threads stay independent.

use pt_math::{Vec2, Vec3};
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}

/// Cosine-weighted direction on the +Z hemisphere from two uniform numbers.
pub fn cosine_hemisphere(u1: f32, u2: f32) -> Vec3 {
    let r = u1.sqrt();
    let phi = 2.0 * PI * u2;
    Vec3::new(r * phi.cos(), r * phi.sin(), (1.0 - u1).max(0.0).sqrt())
}

/// Orthonormal tangent frame (t, b, n) around the unit vector `n`.
pub fn build_basis(n: Vec3) -> (Vec3, Vec3, Vec3) {
    let up = if n.y.abs() < 0.999 { Vec3::Y } else { Vec3::X };
    let t = up.cross(n).normalize();
    let b = n.cross(t);
    (t, b, n)
}

/// Cosine-weighted random direction around `normal`.
pub fn cosine_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let local = cosine_hemisphere(gen_f32(rng), gen_f32(rng));
    let (t, b, n) = build_basis(normal);
    t * local.x + b * local.y + n * local.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_square_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&p.x));
            assert!((-0.5..0.5).contains(&p.y));
        }
    }

    #[test]
    fn test_cosine_direction_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Vec3::new(1.0, 2.0, -0.5).normalize();

        let mut mean_cos = 0.0;
        let n = 4000;
        for _ in 0..n {
            let dir = cosine_direction(normal, &mut rng);
            assert!((dir.length() - 1.0).abs() < 1e-4);
            assert!(dir.dot(normal) >= -1e-6);
            mean_cos += dir.dot(normal);
        }

        // E[cos] = 2/3 for a cosine-weighted hemisphere
        mean_cos /= n as f32;
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.03, "mean cos = {}", mean_cos);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for n in [Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::new(0.3, -0.4, 0.866).normalize()] {
            let (t, b, n) = build_basis(n);
            assert!(t.dot(b).abs() < 1e-5);
            assert!(t.dot(n).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
        }
    }
}
