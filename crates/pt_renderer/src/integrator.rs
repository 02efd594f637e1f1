//! Unidirectional Monte Carlo path integrator.
//!
//! Each call follows one camera path until it reaches a light, leaves the
//! scene, or hits the depth cap, and returns one noisy radiance sample.

use crate::material::Scatter;
use crate::sampling::gen_f32;
use crate::scene::Scene;
use pt_core::{Color, RenderSettings};
use pt_math::Ray;
use rand::RngCore;

/// Radiance arriving along `ray`, with the path already `depth` bounces deep.
///
/// Written as a loop carrying the product of albedos seen so far rather
/// than as recursion, so the stack does not grow with `max_depth`. Paths
/// truncated at `max_depth` contribute black, which biases deep
/// interreflections slightly dark.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, settings: &RenderSettings, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut depth = depth;
    let mut throughput = Color::ONE;

    loop {
        if depth >= settings.max_depth {
            return Color::ZERO;
        }

        let Some(rec) = scene.find_nearest(&ray) else {
            return throughput * settings.background;
        };

        // Lights end the path with their emission
        if rec.material.is_emissive() {
            return throughput * rec.material.emitted();
        }

        let Some(result) = rec.material.scatter(&ray, &rec, rng) else {
            return Color::ZERO;
        };
        throughput *= result.attenuation;

        if let Some(start) = settings.russian_roulette_depth {
            if depth >= start {
                let survival = throughput.max_element().clamp(0.05, 0.95);
                if gen_f32(rng) >= survival {
                    return Color::ZERO;
                }
                throughput /= survival;
            }
        }

        ray = result.scattered;
        depth += 1;
    }
}
