//! Render and display configuration.
//!
//! Plain values passed explicitly into the renderer and the tone mapper.
//! Nothing here is global or mutated during a pass.

use serde::{Deserialize, Serialize};

use crate::material::Color;

/// Path tracing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Bounces after which a path is truncated to black
    pub max_depth: u32,
    /// Radiance returned by rays that leave the scene
    pub background: Color,
    /// Stop sampling once every pixel has this many samples (`None` = run indefinitely)
    pub target_samples: Option<u32>,
    /// Base seed for the per-row random generators
    pub seed: u64,
    /// Jitter primary rays inside the pixel footprint (anti-aliasing)
    pub jitter: bool,
    /// Start Russian roulette termination at this depth (`None` = disabled)
    pub russian_roulette_depth: Option<u32>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            max_depth: 8,
            background: Color::ZERO,
            target_samples: None,
            seed: 0,
            jitter: true,
            russian_roulette_depth: None,
        }
    }
}

impl RenderSettings {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set maximum path depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Stop refining after `samples` samples per pixel.
    pub fn with_target_samples(mut self, samples: u32) -> Self {
        self.target_samples = Some(samples);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_russian_roulette(mut self, start_depth: u32) -> Self {
        self.russian_roulette_depth = Some(start_depth);
        self
    }
}

/// Tone mapping curve applied after exposure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// Exposure only
    Linear,
    /// Luminance-based Reinhard, L / (1 + L)
    GlobalReinhard,
    /// Hable's Uncharted 2 filmic curve
    #[default]
    Uncharted2,
}

/// Tone mapping configuration, scoped to a single tone mapping call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneMapSettings {
    pub mode: ToneMapping,
    /// Linear scale applied to the raw radiance
    pub exposure: f32,
    /// Extra scale fed into the Uncharted 2 curve
    pub exposure_bias: f32,
}

impl Default for ToneMapSettings {
    fn default() -> Self {
        Self {
            mode: ToneMapping::default(),
            exposure: 16.0,
            exposure_bias: 2.0,
        }
    }
}

impl ToneMapSettings {
    pub fn new(mode: ToneMapping, exposure: f32) -> Self {
        Self {
            mode,
            exposure,
            ..Default::default()
        }
    }
}
