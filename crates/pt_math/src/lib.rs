//! Math types shared by the path tracer crates.
//!
//! Re-exports glam's vector types and adds the ray-tracing primitives
//! (`Ray`, `Interval`, `Aabb`) used by the intersection code.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Minimum hit distance accepted by intersection tests.
///
/// Hits closer than this are treated as misses so that a ray spawned on a
/// surface does not immediately re-hit that same surface.
pub const HIT_EPSILON: f32 = 1e-3;
