use crate::HIT_EPSILON;

/// A closed range of ray parameters `[min, max]`.
///
/// Intersection tests only accept hits whose distance lies inside the
/// interval, and the nearest-hit scans shrink `max` as closer hits are found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Every distance in front of a ray origin, past the self-hit epsilon.
    pub const FORWARD: Interval = Interval {
        min: HIT_EPSILON,
        max: f32::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, new upper bound.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Expands the interval by delta/2 on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
    }

    #[test]
    fn test_forward_rejects_self_hits() {
        let forward = Interval::FORWARD;

        assert!(!forward.surrounds(0.0));
        assert!(!forward.surrounds(HIT_EPSILON * 0.5));
        assert!(forward.surrounds(1.0));
        assert!(forward.surrounds(1e10));
    }

    #[test]
    fn test_with_max_shrinks() {
        let shrunk = Interval::FORWARD.with_max(4.0);
        assert_eq!(shrunk.min, HIT_EPSILON);
        assert!(!shrunk.surrounds(5.0));
        assert!(shrunk.surrounds(3.0));
    }

    #[test]
    fn test_interval_expand() {
        let expanded = Interval::new(0.0, 10.0).expand(4.0);

        // Expanded by 2.0 on each side (4.0 / 2)
        assert_eq!(expanded.min, -2.0);
        assert_eq!(expanded.max, 12.0);
    }
}
