//! HDR to display conversion.
//!
//! Every pixel goes through the same steps, in this order:
//!
//! 1. `visible = raw * exposure`
//! 2. `clamped = clamp(raw, 0, 1)`, a copy of the raw color. Reinhard takes
//!    its luminance from this copy, not from `visible`.
//! 3. The tone curve selected by [`ToneMapping`]
//! 4. Clamp to [0, 1]
//! 5. Gamma 2.2
//!
//! Clamping the raw color before exposure is applied mirrors the look the
//! renderer was tuned against and is kept as is.

use crate::accumulation::SampleBuffer;
use pt_core::{Color, ToneMapSettings, ToneMapping};
use rayon::prelude::*;

/// Display gamma.
pub const GAMMA: f32 = 2.2;

/// Luminance floor for Reinhard.
const MIN_LUMINANCE: f32 = 1e-6;

// Uncharted 2 filmic curve constants
const A: f32 = 0.15; // shoulder strength
const B: f32 = 0.50; // linear strength
const C: f32 = 0.10; // linear angle
const D: f32 = 0.20; // toe strength
const E: f32 = 0.02; // toe numerator
const F: f32 = 0.30; // toe denominator
const W: f32 = 11.2; // linear white point

/// Relative luminance (Rec. 709 weights).
#[inline]
pub fn luminance(color: Color) -> f32 {
    0.212671 * color.x + 0.71516 * color.y + 0.072169 * color.z
}

/// Hable's rational filmic curve, per channel.
fn uncharted2_curve(x: Color) -> Color {
    let num = x * (A * x + Color::splat(C * B)) + Color::splat(D * E);
    let den = x * (A * x + Color::splat(B)) + Color::splat(D * F);
    num / den - Color::splat(E / F)
}

/// Tone map a single HDR radiance value to a display color in [0, 1].
pub fn tone_map_pixel(raw: Color, settings: &ToneMapSettings) -> Color {
    let mut visible = raw * settings.exposure;
    let clamped = raw.clamp(Color::ZERO, Color::ONE);

    match settings.mode {
        ToneMapping::Linear => {}
        ToneMapping::GlobalReinhard => {
            let l = luminance(clamped).max(MIN_LUMINANCE);
            let l_display = l / (1.0 + l);
            visible *= l_display / l;
        }
        ToneMapping::Uncharted2 => {
            let white_scale = Color::ONE / uncharted2_curve(Color::splat(W));
            visible = uncharted2_curve(settings.exposure_bias * visible) * white_scale;
        }
    }

    visible.clamp(Color::ZERO, Color::ONE).powf(1.0 / GAMMA)
}

/// Display-ready image, linear floats in [0, 1] after gamma.
#[derive(Debug, Clone)]
pub struct DisplayImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl DisplayImage {
    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let texels: Vec<[u8; 4]> = self.pixels.par_iter().map(|&c| color_to_rgba(c)).collect();
        bytemuck::cast_slice(&texels).to_vec()
    }
}

/// Convert a display color to 8-bit RGBA.
#[inline]
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = (color.clamp(Color::ZERO, Color::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Tone map the whole buffer. Pixels are independent and run in parallel.
pub fn tone_map(buffer: &SampleBuffer, settings: &ToneMapSettings) -> DisplayImage {
    let pixels = buffer
        .cells()
        .par_iter()
        .map(|cell| tone_map_pixel(cell.color, settings))
        .collect();

    DisplayImage {
        width: buffer.width(),
        height: buffer.height(),
        pixels,
    }
}
