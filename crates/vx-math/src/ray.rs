//! Rays, segments and lines.
//!
//! A [`Ray`] is an origin plus a direction. The same type describes three
//! parametric sets, depending on which query it is passed to:
//!
//! - a **ray**: `origin + t * direction`, `t >= 0`
//! - a **segment**: `t` in `[0, 1]`, so `direction` spans the segment
//! - a **line**: any `t`
//!
//! The direction does not need to be normalized.

use crate::{Mat4, Vec3};

/// Origin and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Direction (segment span when used as a segment)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray.
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `a` through `b`; as a segment it spans exactly `a..b`.
    #[inline]
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(a, b - a)
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// End point when used as a segment.
    #[inline]
    pub fn end(&self) -> Vec3 {
        self.origin + self.direction
    }

    /// Squared distance from `p` to the supporting line.
    pub fn distance_sq(&self, p: Vec3) -> f32 {
        let len_sq = self.direction.length_squared();
        let w = p - self.origin;
        if len_sq == 0.0 {
            return w.length_squared();
        }
        let t = w.dot(self.direction) / len_sq;
        (w - self.direction * t).length_squared()
    }

    /// Ray in the space of `m`.
    #[inline]
    pub fn transform(&self, m: &Mat4) -> Self {
        Self::new(m.transform_point(self.origin), m.transform_vector(self.direction))
    }
}
