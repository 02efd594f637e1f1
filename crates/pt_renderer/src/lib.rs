//! CPU path tracer with progressive accumulation.
//!
//! A unidirectional Monte Carlo path tracer over a small closed set of
//! shapes (spheres, axis-aligned boxes, triangles and triangle meshes).
//! Samples from successive frames are averaged per pixel, and the HDR
//! result is tone mapped into a displayable image.
//!
//! ```ignore
//! use pt_core::{RenderSettings, SceneDescription, ToneMapSettings};
//! use pt_renderer::Renderer;
//!
//! let mut renderer = Renderer::from_description(&SceneDescription::cornell_box(), RenderSettings::default())?;
//! loop {
//!     renderer.render();
//!     let image = renderer.tone_map(&ToneMapSettings::default());
//!     present(image.to_rgba8());
//! }
//! ```

mod aabox;
mod accumulation;
mod camera;
mod hittable;
mod integrator;
mod material;
mod mesh;
mod primitive;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod tonemap;
mod triangle;

pub use aabox::AxisBox;
pub use accumulation::{SampleBuffer, SampleCell};
pub use camera::Camera;
pub use hittable::{HitRecord, ShapeHit};
pub use integrator::trace;
pub use material::{reflect, reflectance, refract, Scatter, ScatterResult};
pub use mesh::MeshObject;
pub use primitive::{Primitive, Shape};
pub use renderer::{FrameStats, Renderer};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tonemap::{color_to_rgba, luminance, tone_map, tone_map_pixel, DisplayImage, GAMMA};
pub use triangle::Triangle;

/// Re-export core types used in the public API
pub use pt_core::{Color, Material, MaterialKind, RenderSettings, ToneMapSettings, ToneMapping};
pub use pt_math::{Interval, Ray, Vec3};
