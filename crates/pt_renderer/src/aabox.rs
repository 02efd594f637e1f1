//! Axis-aligned box primitive.
//!
//! Uses the slab method: the ray is clipped against the three pairs of
//! parallel planes, and the face normal comes from whichever axis produced
//! the tightest bound.

use crate::hittable::ShapeHit;
use pt_math::{Interval, Ray, Vec3, HIT_EPSILON};

/// Below this a direction component counts as parallel to the slab.
const PARALLEL_EPSILON: f32 = 1e-12;

/// A solid axis-aligned box between two corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBox {
    min: Vec3,
    max: Vec3,
}

/// Entry/exit parameters of a ray through the box and the axes they belong to.
#[derive(Debug, Clone, Copy)]
struct SlabSpan {
    t_near: f32,
    near_axis: usize,
    t_far: f32,
    far_axis: usize,
}

impl AxisBox {
    /// Create a box. Corners are taken as given: a box whose `min` exceeds
    /// `max` on any axis is inverted and never reports a hit.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// True if the bounds are inverted on any axis.
    pub fn is_inverted(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    fn span(&self, ray: &Ray) -> Option<SlabSpan> {
        if self.is_inverted() {
            return None;
        }

        let mut span = SlabSpan {
            t_near: f32::NEG_INFINITY,
            near_axis: 0,
            t_far: f32::INFINITY,
            far_axis: 0,
        };

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];

            // Parallel to this slab: either always inside it or never
            if dir.abs() < PARALLEL_EPSILON {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (self.min[axis] - origin) * inv;
            let mut t1 = (self.max[axis] - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > span.t_near {
                span.t_near = t0;
                span.near_axis = axis;
            }
            if t1 < span.t_far {
                span.t_far = t1;
                span.far_axis = axis;
            }
        }

        if span.t_near > span.t_far || span.t_far < HIT_EPSILON {
            return None;
        }
        Some(span)
    }

    /// Parameters where the ray's line enters and leaves the box.
    ///
    /// The entry may be negative when the ray starts inside.
    pub fn entry_exit(&self, ray: &Ray) -> Option<(f32, f32)> {
        self.span(ray).map(|s| (s.t_near, s.t_far))
    }

    /// Nearest boundary crossing inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        let span = self.span(ray)?;

        // Entering through a face whose outward normal opposes the ray,
        // or leaving through one that points along it.
        let (t, axis, sign) = if ray_t.surrounds(span.t_near) {
            (span.t_near, span.near_axis, -ray.direction[span.near_axis].signum())
        } else if ray_t.surrounds(span.t_far) {
            (span.t_far, span.far_axis, ray.direction[span.far_axis].signum())
        } else {
            return None;
        };

        let mut outward_normal = Vec3::ZERO;
        outward_normal[axis] = sign;

        Some(ShapeHit { t, outward_normal })
    }
}
